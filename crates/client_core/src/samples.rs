//! Canned incident narratives offered next to the input box.

use thiserror::Error;

pub const INCIDENT_SAMPLES: [&str; 5] = [
    "A drunk man slapped a woman on the road and abused her.",
    "Two men threatened a shopkeeper with a knife and stole cash from the counter.",
    "A neighbour threatened to kill me if I file a complaint against him.",
    "Someone stole my mobile phone from my bag in a crowded bus.",
    "A man touched a woman inappropriately in a crowded train.",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sample index {index} is out of range ({len} samples available)")]
pub struct SampleOutOfRange {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SampleSelector {
    samples: &'static [&'static str],
}

impl Default for SampleSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSelector {
    pub const fn new() -> Self {
        Self {
            samples: &INCIDENT_SAMPLES,
        }
    }

    pub const fn with_samples(samples: &'static [&'static str]) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &'static [&'static str] {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn pick(&self, index: usize) -> Result<&'static str, SampleOutOfRange> {
        self.samples
            .get(index)
            .copied()
            .ok_or(SampleOutOfRange {
                index,
                len: self.samples.len(),
            })
    }
}
