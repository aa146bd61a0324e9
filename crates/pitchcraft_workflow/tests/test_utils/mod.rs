//! Test utilities for session tests.

pub mod mock_generator;

#[allow(unused_imports)]
pub use mock_generator::{
    Gate, MockKeySelector, MockOutcome, MockPitchGenerator, dog_walker_narrative,
};

use pitchcraft_workflow::PitchSession;
use std::sync::Arc;

/// Session over a fresh mock generator and a selector that reports a key.
#[allow(dead_code)]
pub fn session() -> (PitchSession, Arc<MockPitchGenerator>, Arc<MockKeySelector>) {
    session_with(MockKeySelector::new(true))
}

/// Session over a fresh mock generator and the given selector.
pub fn session_with(
    selector: MockKeySelector,
) -> (PitchSession, Arc<MockPitchGenerator>, Arc<MockKeySelector>) {
    let generator = Arc::new(MockPitchGenerator::new());
    let selector = Arc::new(selector);
    let session = PitchSession::new(generator.clone(), selector.clone());
    (session, generator, selector)
}
