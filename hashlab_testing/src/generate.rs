//! Data generation utilities useful for testing.
use hashlab_core::Key;
use rand::Rng;
use std::collections::HashSet;
use std::hash::Hash;

/// Provides capabilities to generate random values of the implementer-type.
pub trait Generate<R: Rng>: Sized {
    /// Parameters for data-generation specific for the type.
    type GenerateParams: Default;

    /// Generates a single random value of the type.
    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self;

    /// Generates a slice of **unique** random values of the type.
    ///
    /// The caller must make sure that `size` unique values exist.
    fn generate_many(rng: &mut R, params: &Self::GenerateParams, size: usize) -> Box<[Self]>
    where
        Self: Hash + Eq + Clone,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::with_capacity(size);
        while values.len() < size {
            let value = Self::generate(rng, params);
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values.into_boxed_slice()
    }
}

/// Parameters for generating [`Key`]s.
pub struct KeyParams {
    digits: usize,
}

impl KeyParams {
    pub fn new(digits: usize) -> Self {
        debug_assert!(digits > 0, r#""digits" must be positive"#);
        Self { digits }
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Number of distinct keys of this width, saturated at `usize::MAX`.
    pub fn num_keys(&self) -> usize {
        u32::try_from(self.digits)
            .ok()
            .and_then(|digits| 10_usize.checked_pow(digits))
            .unwrap_or(usize::MAX)
    }
}

impl Default for KeyParams {
    fn default() -> Self {
        Self { digits: 4 }
    }
}

impl<R: Rng> Generate<R> for Key {
    type GenerateParams = KeyParams;

    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
        let raw: String = (0..params.digits)
            .map(|_| char::from(b'0' + rng.random_range(0..10_u8)))
            .collect();
        Key::parse(&raw, params.digits).unwrap()
    }
}

/// Generates `size` unique keys of `digits` digits, sharing home addresses more often than
/// uniform keys do: every key is congruent to one of a few residues modulo `modulus`.
pub fn generate_colliding_keys<R: Rng>(
    rng: &mut R,
    digits: usize,
    modulus: usize,
    size: usize,
) -> Box<[Key]> {
    let params = KeyParams::new(digits);
    let residues = [0, modulus / 2];
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(size);
    while keys.len() < size {
        let key = Key::generate(rng, &params);
        let residue = key
            .digits()
            .fold(0_usize, |acc, d| (acc * 10 + d as usize) % modulus);
        if residues.contains(&residue) && seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys.into_boxed_slice()
}
