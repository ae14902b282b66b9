//! Arcfour (RC4) keystream engine.
//!
//! The cipher is used as a keyed byte generator: the whole input is scheduled
//! as the key, and the keystream becomes digest material. For keys of 1-256
//! bytes the schedule is the conventional RC4 KSA. Longer keys keep going
//! with the permutation index wrapping; the empty key runs the 256 steps with
//! an implicit key byte of zero.

use tracing::trace;

/// Size of the permutation state.
pub const SBOX_SIZE: usize = 256;

/// RC4 permutation state and cursors.
///
/// The permutation is only reachable through the methods below, so it stays
/// a bijection of 0..=255 for the lifetime of the value.
#[derive(Clone)]
pub struct Arcfour {
    state: [u8; SBOX_SIZE],
    i: u8,
    j: u8,
}

impl Arcfour {
    /// Create an engine with the identity permutation and both cursors at 0.
    pub fn new() -> Self {
        Self {
            state: std::array::from_fn(|i| i as u8),
            i: 0,
            j: 0,
        }
    }

    /// Create an engine keyed with `key` (conventional RC4 setup).
    pub fn with_key(key: &[u8]) -> Self {
        let mut cipher = Self::new();
        cipher.absorb(key);
        cipher
    }

    /// Absorb `key` into the permutation and reset the cursors.
    ///
    /// Equivalent to feeding `key` through a [`KeySchedule`] in one piece.
    pub fn absorb(&mut self, key: &[u8]) {
        let mut schedule = KeySchedule::new(self);
        schedule.update(key);
        schedule.finish();
    }

    /// Encrypt/decrypt data (RC4 is symmetric).
    pub fn process(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|byte| byte ^ self.next_byte()).collect()
    }

    /// Pseudo-random generation algorithm (PRGA).
    pub fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.state[self.i as usize]);
        self.state.swap(self.i as usize, self.j as usize);

        let idx = self.state[self.i as usize].wrapping_add(self.state[self.j as usize]);
        self.state[idx as usize]
    }

    /// Generate and drop `n` keystream bytes.
    pub fn discard(&mut self, n: usize) {
        trace!(bytes = n, "discarding keystream");
        for _ in 0..n {
            self.next_byte();
        }
    }

    /// One KSA step at permutation position `pos` with key byte `k`.
    fn mix(&mut self, pos: u8, k: u8) {
        self.j = self
            .j
            .wrapping_add(self.state[pos as usize])
            .wrapping_add(k);
        self.state.swap(pos as usize, self.j as usize);
    }
}

impl Default for Arcfour {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Arcfour {
    // The permutation is keyed by the input, keep it out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arcfour").finish_non_exhaustive()
    }
}

/// Incremental key scheduling.
///
/// Bytes are mixed in as they arrive, so a key of any length can be streamed
/// without holding it in memory. Only the first [`SBOX_SIZE`] key bytes are
/// retained: a short key has to be cycled until the schedule reaches 256
/// steps, which can only happen once the end of the key is known.
pub struct KeySchedule<'a> {
    engine: &'a mut Arcfour,
    steps: u64,
    head: Vec<u8>,
}

impl<'a> KeySchedule<'a> {
    /// Start scheduling into `engine`, continuing from its current state.
    pub fn new(engine: &'a mut Arcfour) -> Self {
        Self {
            engine,
            steps: 0,
            head: Vec::with_capacity(SBOX_SIZE),
        }
    }

    /// Mix the next chunk of key bytes.
    pub fn update(&mut self, key: &[u8]) {
        for &k in key {
            if self.head.len() < SBOX_SIZE {
                self.head.push(k);
            }
            self.engine.mix(self.steps as u8, k);
            self.steps += 1;
        }
    }

    /// Number of key bytes absorbed so far.
    pub fn absorbed(&self) -> u64 {
        self.steps
    }

    /// Complete the schedule and reset the cursors for generation.
    pub fn finish(self) {
        let Self {
            engine,
            steps,
            head,
        } = self;

        // steps < 256 here, so the cast and the loop bound are exact.
        if steps < SBOX_SIZE as u64 {
            for n in steps as usize..SBOX_SIZE {
                let k = if head.is_empty() {
                    0
                } else {
                    head[n % head.len()]
                };
                engine.mix(n as u8, k);
            }
        }

        engine.i = 0;
        engine.j = 0;
    }
}
