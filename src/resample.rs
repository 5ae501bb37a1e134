//! Resampling of capture rows onto the output timeline.
//!
//! The resampler walks the row stream while advancing an output clock. For
//! every output tick it keeps the pair of tracked samples `prev`, `next`
//! such that `time(prev) < time(tick) <= time(next)` and blends between
//! them. Rows that do not carry the target object are skipped, so tracking
//! gaps are bridged by interpolation rather than held.
//!
//! Frame arithmetic is done on 0-based frames; emitted frames are 1-based.

use crate::config::ImportConfig;
use crate::extract::{frame_number, PoseExtractor};
use crate::interpolate::interpolate;
use crate::table::RawRow;
use crate::types::{InterpolationOffset, OutputSample, Pose};
use crate::{ImportError, Result};

/// Receives resampled poses.
pub trait PoseSink {
    /// Called once per output frame, in increasing frame order.
    fn on_sample(&mut self, frame: u64, pose: &Pose);

    /// Called after the last sample with the highest frame emitted.
    fn on_complete(&mut self, last_frame: u64);
}

impl PoseSink for Vec<OutputSample> {
    fn on_sample(&mut self, frame: u64, pose: &Pose) {
        self.push(OutputSample { frame, pose: *pose });
    }

    fn on_complete(&mut self, _last_frame: u64) {}
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub samples: usize,
    pub first_frame: Option<u64>,
    pub last_frame: Option<u64>,
}

/// A tracked sample: source row, 0-based capture frame and its pose.
#[derive(Debug, Clone, Copy)]
struct Sample {
    row: u64,
    frame: i64,
    pose: Pose,
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// Looking for the first row that carries the target object.
    Seeking,
    /// `prev` is `None` only while the first tick sits exactly on `next`.
    Bracketing { prev: Option<Sample>, next: Sample },
    Done,
}

/// Lazy resampler over a row stream.
///
/// Yields one [`OutputSample`] per output tick. Dropping it early leaves the
/// row source where it was.
pub struct Resampler<I> {
    rows: I,
    extractor: PoseExtractor,
    offset: InterpolationOffset,
    input_rate: f64,
    output_rate: f64,
    state: State,
    /// Current 0-based output frame.
    tick: u64,
    first_frame: Option<u64>,
    last_frame: Option<u64>,
    samples: usize,
}

impl<I> Resampler<I>
where
    I: Iterator<Item = Result<RawRow>>,
{
    /// Resample the object whose sextet starts at `column`.
    pub fn new(rows: I, column: usize, config: &ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rows,
            extractor: PoseExtractor::new(column, config.rotation_encoding),
            offset: config.offset,
            input_rate: config.input_frame_rate,
            output_rate: config.output_frame_rate,
            state: State::Seeking,
            tick: 0,
            first_frame: None,
            last_frame: None,
            samples: 0,
        })
    }

    /// Highest 1-based frame emitted so far.
    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            samples: self.samples,
            first_frame: self.first_frame,
            last_frame: self.last_frame,
        }
    }

    /// Drive the resampler to the end, feeding every sample to `sink`.
    ///
    /// `on_complete` is only called when at least one sample was emitted and
    /// the input was consumed without error.
    pub fn run<S: PoseSink + ?Sized>(mut self, sink: &mut S) -> Result<ImportSummary> {
        for sample in &mut self {
            let sample = sample?;
            sink.on_sample(sample.frame, &sample.pose);
        }

        if let Some(last) = self.last_frame {
            sink.on_complete(last);
        }

        let summary = self.summary();
        log::info!(
            "Resampled {} frame(s) ({:?}..={:?})",
            summary.samples,
            summary.first_frame,
            summary.last_frame
        );
        Ok(summary)
    }

    /// Next row carrying the target object, skipping markers and gaps.
    fn next_tracked(&mut self) -> Result<Option<Sample>> {
        for row in &mut self.rows {
            let row = row?;
            match self.extractor.extract(&row)? {
                Some(pose) => {
                    let frame = frame_number(&row)?;
                    return Ok(Some(Sample {
                        row: row.row,
                        frame,
                        pose,
                    }));
                }
                None => log::trace!("Row {} does not carry the object, skipped", row.row),
            }
        }
        Ok(None)
    }

    /// Smallest output frame whose time is not before capture frame `frame`.
    fn first_tick(&self, frame: i64) -> u64 {
        let scaled = frame as f64 * self.output_rate;
        let mut tick = (scaled / self.input_rate).ceil().max(0.0) as u64;
        // Undo a rounding overshoot of the division.
        while tick > 0 && (tick - 1) as f64 * self.input_rate >= scaled {
            tick -= 1;
        }
        tick
    }

    fn finish(&mut self) {
        log::debug!("End of input, last output frame {:?}", self.last_frame);
        self.state = State::Done;
    }

    fn step(&mut self) -> Result<Option<OutputSample>> {
        loop {
            match self.state {
                State::Seeking => match self.next_tracked()? {
                    Some(first) => {
                        self.tick = self.first_tick(first.frame);
                        log::debug!(
                            "Object first tracked at capture frame {}, output starts at frame {}",
                            first.frame + 1,
                            self.tick.saturating_add(1)
                        );
                        self.state = State::Bracketing {
                            prev: None,
                            next: first,
                        };
                    }
                    None => {
                        log::warn!("No row carries the target object, nothing to resample");
                        self.finish();
                        return Ok(None);
                    }
                },
                State::Bracketing { mut prev, mut next } => {
                    // Tick time expressed in capture frames, scaled by the output rate.
                    let target = self.tick as f64 * self.input_rate;
                    while (next.frame as f64) * self.output_rate < target {
                        match self.next_tracked()? {
                            Some(sample) => {
                                prev = Some(next);
                                next = sample;
                            }
                            None => {
                                self.finish();
                                return Ok(None);
                            }
                        }
                    }

                    let pose = match prev {
                        None => next.pose,
                        Some(prev) => {
                            let time = target / self.output_rate;
                            let span = next.frame as f64 - prev.frame as f64;
                            let alpha = (time - prev.frame as f64) / span;
                            interpolate(&prev.pose, &next.pose, alpha)
                        }
                    };
                    let pose = self.offset.apply(&pose);

                    // The output frame must stay representable.
                    let frame = match self.tick.checked_add(1) {
                        Some(frame) => frame,
                        None => {
                            return Err(ImportError::Parse {
                                row: next.row,
                                field: 0,
                                value: (next.frame + 1).to_string(),
                            })
                        }
                    };
                    self.tick = frame;
                    self.state = State::Bracketing { prev, next };
                    self.first_frame.get_or_insert(frame);
                    self.last_frame = Some(frame);
                    self.samples += 1;
                    log::trace!(
                        "Frame {} <- capture frames {:?}..{}",
                        frame,
                        prev.map(|p| p.frame + 1),
                        next.frame + 1
                    );

                    return Ok(Some(OutputSample { frame, pose }));
                }
                State::Done => return Ok(None),
            }
        }
    }
}

impl<I> Iterator for Resampler<I>
where
    I: Iterator<Item = Result<RawRow>>,
{
    type Item = Result<OutputSample>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(sample)) => Some(Ok(sample)),
            Ok(None) => None,
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}
