use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::color::raster::{RasterImage, decode_image, load_image};
use crate::engine::swarm::SwarmEngine;
use crate::foundation::error::SwarmResult;

/// Identifies one subject selection. Images are only accepted for the ticket that is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubjectTicket {
    generation: u64,
}

impl SubjectTicket {
    /// Monotonic generation number; each subject change bumps it.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Outcome of offering an image to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOffer {
    /// Installed; sampling starts on the next frame.
    Applied,
    /// Ticket belongs to an older subject; dropped.
    Stale,
    /// Wrong buffer shape or failed decode; the previous state is kept.
    Malformed,
}

/// The loaded subject image plus the generation it belongs to.
#[derive(Debug, Default)]
pub(crate) struct ImageSlot {
    generation: u64,
    image: Option<Arc<RasterImage>>,
}

impl ImageSlot {
    pub(crate) fn ticket(&self) -> SubjectTicket {
        SubjectTicket {
            generation: self.generation,
        }
    }

    /// Start a new subject: drop the image and invalidate every outstanding ticket.
    pub(crate) fn begin(&mut self) -> SubjectTicket {
        self.generation = self.generation.wrapping_add(1);
        self.image = None;
        self.ticket()
    }

    pub(crate) fn offer(&mut self, ticket: SubjectTicket, image: RasterImage) -> ImageOffer {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding image for stale subject"
            );
            return ImageOffer::Stale;
        }
        if !image.is_valid() {
            tracing::warn!(
                width = image.width,
                height = image.height,
                len = image.rgba8.len(),
                "ignoring malformed subject image"
            );
            return ImageOffer::Malformed;
        }
        self.image = Some(Arc::new(image));
        ImageOffer::Applied
    }

    /// Cheap handle to the current image; taken once per frame.
    pub(crate) fn current(&self) -> Option<Arc<RasterImage>> {
        self.image.clone()
    }
}

type Delivery = (SubjectTicket, SwarmResult<RasterImage>);

/// Decodes subject images on the rayon pool and hands results back to the frame loop.
///
/// Decoding never blocks the caller. Results are applied with [`FlagLoader::drain_into`] (between
/// frames) or [`FlagLoader::recv_into`]; anything tagged with an outdated ticket is discarded
/// there.
pub struct FlagLoader {
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
}

impl FlagLoader {
    /// New loader with an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Decode encoded image bytes in the background.
    pub fn load_bytes(&self, ticket: SubjectTicket, bytes: Vec<u8>) {
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let result = decode_image(&bytes);
            // The receiver only disappears with the loader itself.
            let _ = tx.send((ticket, result));
        });
    }

    /// Read and decode an image file in the background.
    pub fn load_path(&self, ticket: SubjectTicket, path: impl Into<PathBuf>) {
        let path = path.into();
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let result = load_image(&path);
            let _ = tx.send((ticket, result));
        });
    }

    /// Apply every finished decode without blocking. Returns how many images were installed.
    pub fn drain_into(&self, engine: &mut SwarmEngine) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.rx.try_recv() {
            if deliver(engine, delivery) == ImageOffer::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Wait up to `timeout` for one finished decode and apply it.
    ///
    /// `None` when nothing arrived in time.
    pub fn recv_into(&self, engine: &mut SwarmEngine, timeout: Duration) -> Option<ImageOffer> {
        match self.rx.recv_timeout(timeout) {
            Ok(delivery) => Some(deliver(engine, delivery)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Default for FlagLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver(engine: &mut SwarmEngine, (ticket, result): Delivery) -> ImageOffer {
    match result {
        Ok(image) => engine.offer_image(ticket, image),
        Err(err) if ticket == engine.subject() => {
            tracing::warn!(error = %err, "subject image failed to load");
            ImageOffer::Malformed
        }
        Err(_) => {
            tracing::debug!(ticket = ticket.generation, "discarding failed load for stale subject");
            ImageOffer::Stale
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/subject.rs"]
mod tests;
