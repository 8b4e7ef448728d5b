//! Test helpers

use rand::RngCore;

/// RNG that returns the same word forever
///
/// `ConstRng(u64::MAX)` makes every `random_bool(p < 1)` false;
/// `ConstRng(0)` makes every `random_bool(p > 0)` true and every
/// `random_range` return its lower bound.
pub struct ConstRng(pub u64);

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = (self.0 >> ((i % 8) * 8)) as u8;
        }
    }
}

/// RNG that plays back a fixed list of words, then repeats it
///
/// `next_u32` takes the high half of the next word, matching `ConstRng`.
/// With rand's samplers, `0` is a true coin for any `random_bool(p > 0)`,
/// and a word whose high half is `h` picks index `h * len >> 32` from a short
/// slice.
pub struct ScriptedRng {
    words: Vec<u64>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(words: &[u64]) -> Self {
        Self {
            words: words.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.next % self.words.len()];
        self.next += 1;
        word
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
