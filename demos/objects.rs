//! List the tracked objects of a Vicon Tracker CSV export.
//!
//! Usage: cargo run --example objects -- capture.csv

use std::fs::File;

fn main() {
    env_logger::init();

    let path = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("Usage: objects <capture.csv>");
            std::process::exit(2);
        }
    };

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    match vicon_csv::Importer::new(file) {
        Ok(importer) => {
            println!("Found {} tracked object(s):", importer.objects().len());
            for (i, object) in importer.objects().iter().enumerate() {
                println!("  [{}] {}  column={}", i, object.name, object.column);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
