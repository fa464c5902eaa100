//! C2: bit-packed DNA sequence storage, 2 bits per base.
//!
//! Fixes the three defects documented against the reference implementation:
//! the code-level `push` increments length (the reference's equivalent path
//! silently didn't), `at` never shadows an index variable while deriving
//! byte/bit offsets, and `subsequence` is derived directly from the
//! invariant "output position p holds the base at input position start+p"
//! rather than the reference's off-by-one byte-run splitting.

use crate::error::{Result, SketchError};

/// A DNA base, one of {A, C, G, T}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Encodes a base to its 2-bit code: A=00, C=01, G=10, T=11.
    pub fn code(self) -> u8 {
        match self {
            Base::A => 0b00,
            Base::C => 0b01,
            Base::G => 0b10,
            Base::T => 0b11,
        }
    }

    /// Decodes a 2-bit code into a base.
    pub fn from_code(code: u8) -> Result<Self> {
        match code & 0b11 {
            0b00 => Ok(Base::A),
            0b01 => Ok(Base::C),
            0b10 => Ok(Base::G),
            0b11 => Ok(Base::T),
            other => Err(SketchError::InvalidCode(other)),
        }
    }

    /// Parses an ASCII base character.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'T' => Ok(Base::T),
            other => Err(SketchError::InvalidBase(other)),
        }
    }

    /// The Watson-Crick complement: A<->T, C<->G, i.e. `code XOR 0b11`.
    pub fn complement(self) -> Self {
        // from_code never fails here since code() always returns 0..=3.
        Base::from_code(self.code() ^ 0b11).unwrap_or(Base::A)
    }

    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
        }
    }
}

/// A growable sequence of DNA bases packed 4-to-a-byte, LSB-first within
/// each byte. Length is tracked separately from storage capacity; bits
/// beyond `length` in the final byte are unspecified and must never be
/// compared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnaSequence {
    bytes: Vec<u8>,
    length: usize,
}

impl DnaSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bases: usize) -> Self {
        DnaSequence {
            bytes: Vec::with_capacity(bases.div_ceil(4)),
            length: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends one base, growing storage by one byte on every fourth push.
    pub fn push(&mut self, base: Base) {
        let bit_pos = self.length % 4;
        if bit_pos == 0 {
            self.bytes.push(0);
        }
        let byte_idx = self.length / 4;
        self.bytes[byte_idx] |= base.code() << (bit_pos * 2);
        self.length += 1;
    }

    /// Returns the base at position `i`, or `OutOfRange` if `i >= len()`.
    pub fn at(&self, i: usize) -> Result<Base> {
        if i >= self.length {
            return Err(SketchError::OutOfRange(i));
        }
        let byte_idx = i / 4;
        let bit_pos = i % 4;
        let code = (self.bytes[byte_idx] >> (bit_pos * 2)) & 0b11;
        Base::from_code(code)
    }

    /// Returns the sequence of positions `[start, end)` as a new sequence.
    pub fn subsequence(&self, start: usize, end: usize) -> Result<DnaSequence> {
        if start > end || end > self.length {
            return Err(SketchError::OutOfRange(end));
        }
        let mut out = DnaSequence::with_capacity(end - start);
        for p in 0..(end - start) {
            // output position p holds the base at input position start+p
            out.push(self.at(start + p)?);
        }
        Ok(out)
    }

    /// Returns a new sequence whose i-th base equals `complement(at(len-1-i))`.
    pub fn reverse_complement(&self) -> DnaSequence {
        let mut out = DnaSequence::with_capacity(self.length);
        for i in (0..self.length).rev() {
            // `at` cannot fail here since i < self.length by construction.
            if let Ok(base) = self.at(i) {
                out.push(base.complement());
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = Base> + '_ {
        (0..self.length).map(move |i| self.at(i).expect("index within length"))
    }

    pub fn to_string_lossy(&self) -> String {
        self.iter().map(Base::as_char).collect()
    }
}

impl std::str::FromStr for DnaSequence {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self> {
        let mut seq = DnaSequence::with_capacity(s.len());
        for c in s.chars() {
            seq.push(Base::from_char(c)?);
        }
        Ok(seq)
    }
}
