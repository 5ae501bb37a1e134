use crate::config::{ImportConfig, TargetObject};
use crate::resample::{ImportSummary, PoseSink, Resampler};
use crate::table::{Rows, TableReader, TrackedObject};
use crate::{ImportError, Result};
use std::io;

/// Look up the target in the header's object list.
///
/// A bare name that does not match is retried in its qualified
/// `name:name` form. An empty name selects the first object.
pub fn resolve_object<'a>(
    objects: &'a [TrackedObject],
    target: &TargetObject,
) -> Result<&'a TrackedObject> {
    match target {
        TargetObject::Index(index) => objects
            .get(*index)
            .ok_or_else(|| ImportError::ObjectNotFound(format!("#{}", index))),
        TargetObject::Name(name) if name.is_empty() => objects
            .first()
            .ok_or_else(|| ImportError::ObjectNotFound(String::new())),
        TargetObject::Name(name) => {
            if let Some(object) = objects.iter().find(|o| &o.name == name) {
                return Ok(object);
            }
            let qualified = format!("{0}:{0}", name);
            objects
                .iter()
                .find(|o| o.name == qualified)
                .ok_or_else(|| ImportError::ObjectNotFound(name.clone()))
        }
    }
}

/// An opened capture table whose header has been read.
pub struct Importer<R> {
    table: TableReader<R>,
    objects: Vec<TrackedObject>,
}

impl<R: io::Read> Importer<R> {
    /// Read the header from `source`.
    ///
    /// Fails with [`ImportError::NoTrackedObjects`] when the header lists no
    /// objects.
    pub fn new(source: R) -> Result<Self> {
        let mut table = TableReader::new(source);
        let objects = table.read_header()?;
        if objects.is_empty() {
            return Err(ImportError::NoTrackedObjects);
        }

        log::info!(
            "Capture lists {} object(s): {}",
            objects.len(),
            objects
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { table, objects })
    }

    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    pub fn resolve(&self, target: &TargetObject) -> Result<&TrackedObject> {
        resolve_object(&self.objects, target)
    }

    /// Consume the importer and return a lazy resampler for the configured
    /// object.
    pub fn resampler(self, config: &ImportConfig) -> Result<Resampler<Rows<R>>> {
        let object = self.resolve(&config.target_object)?;
        log::info!(
            "Importing {} (column {}) at {} fps -> {} fps",
            object.name,
            object.column,
            config.input_frame_rate,
            config.output_frame_rate
        );
        let column = object.column;
        Resampler::new(self.table.rows(), column, config)
    }

    /// Resample the configured object into `sink`.
    pub fn run<S: PoseSink + ?Sized>(
        self,
        config: &ImportConfig,
        sink: &mut S,
    ) -> Result<ImportSummary> {
        self.resampler(config)?.run(sink)
    }
}
