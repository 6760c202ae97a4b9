use std::io::{BufRead, Seek};

use crate::data::TrainingData;
use crate::neural::Net;
use crate::prelude::*;

/// Drives a [`Net`] through repeated passes over a training-record stream.
pub struct Trainer {
    epochs: usize,
    epochs_per_log: Option<usize>,
}

impl Trainer {
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            epochs_per_log: None,
        }
    }

    /// Enables a progress line every `epochs_per_log` epochs.
    pub fn with_log(mut self, epochs_per_log: Option<usize>) -> Self {
        self.epochs_per_log = epochs_per_log;
        self
    }

    pub fn set_epochs(&mut self, epochs: usize) {
        self.epochs = epochs;
    }

    /// Trains `net` on every sample of `data`, front to back, once per
    /// epoch. Between epochs only the stream is rewound; the network keeps
    /// its weights, so each epoch continues the same descent.
    ///
    /// Expects `data` to be positioned past its topology line, and leaves
    /// it that way.
    pub fn train<R: BufRead + Seek>(
        &self,
        net: &mut Net,
        data: &mut TrainingData<R>,
    ) -> Result<()> {
        for epoch in 1..=self.epochs {
            let mut records = 0;
            loop {
                let inputs = data.next_input();
                if inputs.len() != net.input_len() {
                    // End of stream for this epoch.
                    break;
                }
                net.forward(&inputs)?;
                let targets = data.next_target();
                net.backpropagate(&targets)?;
                records += 1;
            }

            if self.epochs_per_log.is_some_and(|epl| epoch % epl == 0) {
                println!(
                    "Epoch {epoch} ({records} records) recent average error: {}",
                    net.recent_average_error()
                );
            }

            data.rewind()?;
            data.topology()?;
        }

        Ok(())
    }
}
