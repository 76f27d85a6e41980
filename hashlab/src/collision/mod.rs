//! Collision resolution strategies.
//!
//! Open addressing strategies ([`CollisionResolver::Linear`], [`CollisionResolver::Quadratic`],
//! [`CollisionResolver::DoubleHash`]) describe where to look next when the home address of a key
//! is taken, as a [`ProbeSequence`] of exactly `size` addresses. [`CollisionResolver::Chaining`]
//! never probes: colliding keys share a bucket at their home address.
use crate::hashing::HashFunction;
use hashlab_core::{Key, Result};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollisionResolver {
    /// No strategy: a collision halts the insert until a strategy is configured.
    #[default]
    None,
    /// `a_i = (a_0 + i) mod size`.
    Linear,
    /// `a_i = (a_0 + i * i) mod size`.
    Quadratic,
    /// `a_i = (a_0 + i * step) mod size`, where `step = 1 + secondary(key) mod (size - 1)`.
    DoubleHash { secondary: HashFunction },
    /// Keys sharing a home address are kept together in a bucket.
    Chaining,
}

impl CollisionResolver {
    /// Whether the strategy probes other slots on collision.
    pub fn is_open_addressing(&self) -> bool {
        matches!(
            self,
            CollisionResolver::Linear
                | CollisionResolver::Quadratic
                | CollisionResolver::DoubleHash { .. }
        )
    }

    pub fn is_chaining(&self) -> bool {
        matches!(self, CollisionResolver::Chaining)
    }

    /// Whether any strategy is configured at all.
    pub fn is_configured(&self) -> bool {
        !matches!(self, CollisionResolver::None)
    }

    /// Checks the secondary function of double hashing against the key width.
    pub fn validate(&self, digits: Option<usize>) -> Result<()> {
        match self {
            CollisionResolver::DoubleHash { secondary } => secondary.validate(digits),
            _ => Ok(()),
        }
    }

    /// Address examined on the given `attempt` (`0` is the home address).
    pub fn probe(&self, key: &Key, home: usize, attempt: usize, size: usize) -> usize {
        ProbeStep::new(self, key, size).address(home, attempt, size)
    }

    /// All addresses an open addressing lookup of `key` may examine, home address first.
    ///
    /// Yields `size` addresses for open addressing strategies and only the home address
    /// otherwise.
    pub fn probe_sequence(&self, key: &Key, home: usize, size: usize) -> ProbeSequence {
        debug_assert!(home < size, r#""home" must be an address of the table"#);
        let attempts = if self.is_open_addressing() { size } else { 1 };
        ProbeSequence {
            home,
            size,
            attempt: 0,
            attempts,
            step: ProbeStep::new(self, key, size),
        }
    }
}

impl Display for CollisionResolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionResolver::None => f.write_str("none"),
            CollisionResolver::Linear => f.write_str("linear"),
            CollisionResolver::Quadratic => f.write_str("quadratic"),
            CollisionResolver::DoubleHash { secondary } => write!(f, "double({})", secondary),
            CollisionResolver::Chaining => f.write_str("chaining"),
        }
    }
}

/// Offset rule of a probe sequence with the key-dependent parts already computed.
#[derive(Debug, Clone, Copy)]
enum ProbeStep {
    Home,
    Linear,
    Quadratic,
    Double(usize),
}

impl ProbeStep {
    fn new(resolver: &CollisionResolver, key: &Key, size: usize) -> Self {
        match resolver {
            CollisionResolver::None | CollisionResolver::Chaining => ProbeStep::Home,
            CollisionResolver::Linear => ProbeStep::Linear,
            CollisionResolver::Quadratic => ProbeStep::Quadratic,
            CollisionResolver::DoubleHash { secondary } => {
                let step = if size > 1 {
                    1 + secondary.reduce(key, size - 1)
                } else {
                    1
                };
                ProbeStep::Double(step)
            }
        }
    }

    #[inline]
    fn address(self, home: usize, attempt: usize, size: usize) -> usize {
        let (home, i, n) = (home as u128, attempt as u128, size as u128);
        let offset = match self {
            ProbeStep::Home => 0,
            ProbeStep::Linear => i,
            ProbeStep::Quadratic => i * i % n,
            ProbeStep::Double(step) => i * step as u128 % n,
        };
        ((home + offset) % n) as usize
    }
}

/// Iterator over the addresses of a probe sequence.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    home: usize,
    size: usize,
    attempt: usize,
    attempts: usize,
    step: ProbeStep,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.attempts {
            return None;
        }
        let address = self.step.address(self.home, self.attempt, self.size);
        self.attempt += 1;
        Some(address)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.attempts - self.attempt;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
