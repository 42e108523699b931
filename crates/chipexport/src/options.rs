//! Export options.
//!
//! Callers fill an [`ExportOptions`] with whatever they want to override;
//! [`ExportOptions::merge`] lays those overrides over the chosen format's
//! defaults and yields the concrete [`EncodeOptions`] every encoder takes.
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;
use crate::meta::Metadata;
use crate::timing::{DEFAULT_SAMPLE_RATE, Quantizer};

/// Where playback resumes after the end of the song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPoint {
    /// Absolute position on the source sample clock.
    Sample(u64),
    /// Tracker row position; resolved as `row * samples_per_row`.
    Row { row: u32, samples_per_row: u32 },
}

impl LoopPoint {
    /// Loop position on the source sample clock.
    pub fn sample(self) -> u64 {
        match self {
            LoopPoint::Sample(sample) => sample,
            LoopPoint::Row {
                row,
                samples_per_row,
            } => row as u64 * samples_per_row as u64,
        }
    }
}

/// Optional per-export overrides. `None` keeps the format default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub title: Option<String>,
    pub author: Option<String>,
    pub game: Option<String>,
    pub copyright: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    /// Sample rate the trace timestamps were captured at.
    pub source_sample_rate: Option<u32>,
    /// Playback frame rate for frame-based formats, in Hz.
    pub frame_rate: Option<u32>,
    pub loop_point: Option<LoopPoint>,
    /// Emit the GYMX header in front of a GYM stream.
    pub gym_header: Option<bool>,
}

/// Concrete options consumed by the format encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub metadata: Metadata,
    pub source_sample_rate: u32,
    pub frame_rate: u32,
    pub loop_point: Option<LoopPoint>,
    pub gym_header: bool,
}

impl EncodeOptions {
    /// Defaults for `format`: 44.1 kHz source clock, 50 Hz for SAP and
    /// 60 Hz for everything else, no loop, GYMX header on.
    pub fn defaults_for(format: ExportFormat) -> Self {
        EncodeOptions {
            metadata: Metadata::default(),
            source_sample_rate: DEFAULT_SAMPLE_RATE,
            frame_rate: match format {
                ExportFormat::Sap => 50,
                _ => 60,
            },
            loop_point: None,
            gym_header: true,
        }
    }

    /// Quantizer from the source clock onto `tick_rate`.
    pub fn quantizer(&self, tick_rate: u32) -> Quantizer {
        Quantizer::new(self.source_sample_rate, tick_rate)
    }

    /// Loop position on the source sample clock, if any.
    pub fn loop_sample(&self) -> Option<u64> {
        self.loop_point.map(LoopPoint::sample)
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions::defaults_for(ExportFormat::Vgm)
    }
}

fn positive(name: &'static str, value: Option<u32>) -> Result<Option<u32>> {
    match value {
        Some(0) => Err(ExportError::InvalidOption {
            name,
            message: "must be greater than zero".into(),
        }),
        other => Ok(other),
    }
}

impl ExportOptions {
    /// Lay these overrides over the defaults of `format`.
    ///
    /// Fails with [`ExportError::InvalidOption`] on a zero sample or frame
    /// rate.
    pub fn merge(&self, format: ExportFormat) -> Result<EncodeOptions> {
        let mut options = EncodeOptions::defaults_for(format);
        if let Some(rate) = positive("source_sample_rate", self.source_sample_rate)? {
            options.source_sample_rate = rate;
        }
        if let Some(rate) = positive("frame_rate", self.frame_rate)? {
            options.frame_rate = rate;
        }
        if let Some(LoopPoint::Row {
            samples_per_row: 0, ..
        }) = self.loop_point
        {
            return Err(ExportError::InvalidOption {
                name: "loop_point",
                message: "samples_per_row must be greater than zero".into(),
            });
        }
        options.loop_point = self.loop_point.or(options.loop_point);
        options.gym_header = self.gym_header.unwrap_or(options.gym_header);

        let meta = &mut options.metadata;
        let pairs = [
            (&mut meta.title, &self.title),
            (&mut meta.author, &self.author),
            (&mut meta.game, &self.game),
            (&mut meta.copyright, &self.copyright),
            (&mut meta.date, &self.date),
            (&mut meta.comment, &self.comment),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        Ok(options)
    }
}
