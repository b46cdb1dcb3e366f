//! Deterministic keystream generator ("arcfour", the RC4 stream cipher).
//!
//! Used purely as a cheap, reproducible source of pseudo-random bytes for
//! noise. Identical keys always produce identical streams.

use rand::RngCore;

use crate::error::{Error, Result};

/// Bytes discarded by [`Arcfour::with_drop`] to skip the biased early keystream.
pub const ARCFOUR_DROP: usize = 3072;

/// Key used by the noise generators when none is given.
pub const DEFAULT_NOISE_KEY: [u8; 5] = [1, 2, 3, 4, 5];

/// An RC4 keystream: an infinite iterator of pseudo-random bytes.
///
/// Also implements [`rand::RngCore`], so it can drive any consumer generic
/// over a random number generator.
///
/// # Examples
///
/// ```
/// use lazytone::noise::Arcfour;
///
/// let bytes: Vec<u8> = Arcfour::new("foobar").unwrap().take(4).collect();
/// assert_eq!(bytes, vec![111, 169, 16, 238]);
/// ```
#[derive(Clone)]
pub struct Arcfour {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Arcfour {
    /// Runs the key schedule for `key`, given as text or bytes.
    ///
    /// Returns [`Error::EmptyKey`] if the key has no bytes.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(Self::schedule(key))
    }

    /// Key schedule; `key` must not be empty.
    fn schedule(key: &[u8]) -> Self {
        let mut state = [0u8; 256];
        for (slot, value) in state.iter_mut().zip(0u8..=255) {
            *slot = value;
        }

        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
            state.swap(i, j as usize);
        }

        Self { state, i: 0, j: 0 }
    }

    /// Keys a generator and discards the first [`ARCFOUR_DROP`] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazytone::noise::Arcfour;
    ///
    /// let bytes: Vec<u8> = Arcfour::with_drop("foobar").unwrap().take(4).collect();
    /// assert_eq!(bytes, vec![207, 172, 67, 144]);
    /// ```
    pub fn with_drop(key: impl AsRef<[u8]>) -> Result<Self> {
        Self::drop_n(key, ARCFOUR_DROP)
    }

    /// Keys a generator and discards the first `n` bytes.
    pub fn drop_n(key: impl AsRef<[u8]>, n: usize) -> Result<Self> {
        let mut keystream = Self::new(key)?;
        for _ in 0..n {
            keystream.next_byte();
        }
        Ok(keystream)
    }

    /// Advances the keystream by one byte.
    pub fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.state[self.i as usize]);
        self.state.swap(self.i as usize, self.j as usize);
        let index = self.state[self.i as usize].wrapping_add(self.state[self.j as usize]);
        self.state[index as usize]
    }
}

impl Default for Arcfour {
    fn default() -> Self {
        Self::schedule(&DEFAULT_NOISE_KEY)
    }
}

impl std::fmt::Debug for Arcfour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arcfour")
            .field("i", &self.i)
            .field("j", &self.j)
            .finish_non_exhaustive()
    }
}

impl Iterator for Arcfour {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_byte())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl RngCore for Arcfour {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.next_byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Creates a keystream for `key`; see [`Arcfour::new`].
pub fn arcfour(key: impl AsRef<[u8]>) -> Result<Arcfour> {
    Arcfour::new(key)
}

/// Creates a keystream for `key` with the early bytes dropped.
pub fn arcfour_drop(key: impl AsRef<[u8]>) -> Result<Arcfour> {
    Arcfour::with_drop(key)
}
