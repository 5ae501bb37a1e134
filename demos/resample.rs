//! Resample one tracked object and print JSON lines.
//!
//! One object per output frame:
//!
//! {"frame":1,"x":0.0210,"y":0.0020,"z":0.0280,"qx":0.0,"qy":0.0,"qz":0.0,"qw":1.0}
//!
//! Settings come from `VICON_CSV_*` environment variables; a second
//! argument overrides the target object.
//!
//! Usage: VICON_CSV_OUTPUT_FPS=30 cargo run --example resample -- capture.csv Wand

use std::fs::File;
use std::io::{self, Write};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("Usage: resample <capture.csv> [object]");
            std::process::exit(2);
        }
    };

    let mut config = vicon_csv::ImportConfig::from_env();
    if let Some(target) = args.next() {
        config.target_object = vicon_csv::config::parse_target(&target);
    }

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let resampler = match vicon_csv::Importer::new(file).and_then(|i| i.resampler(&config)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start import: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut count: u64 = 0;

    for sample in resampler {
        match sample {
            Ok(sample) => {
                count += 1;
                let p = sample.pose.position;
                let q = sample.pose.orientation;
                let _ = writeln!(
                    out,
                    "{{\"frame\":{},\"x\":{:.4},\"y\":{:.4},\"z\":{:.4},\"qx\":{:.6},\"qy\":{:.6},\"qz\":{:.6},\"qw\":{:.6}}}",
                    sample.frame, p[0], p[1], p[2], q.x, q.y, q.z, q.w,
                );
            }
            Err(e) => {
                let _ = out.flush();
                eprintln!("Error after {} frame(s): {}", count, e);
                std::process::exit(1);
            }
        }
    }

    let _ = out.flush();
    eprintln!("Wrote {} frame(s)", count);
}
