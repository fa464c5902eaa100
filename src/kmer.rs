//! Canonical k-mer type: a fixed-length DNA substring together with its
//! canonicalization under reverse-complement, the form every sketch and the
//! ground-truth counter actually key on.

use bytes::Bytes;

use crate::dna::Base;
use crate::error::{Result, SketchError};

/// A k-mer, stored as its raw ASCII bytes (zero-copy slice of the producer's
/// sequence buffer via `bytes::Bytes`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kmer(Bytes);

impl Kmer {
    /// Builds a k-mer from a byte slice, validating every base is in
    /// {A,C,G,T}. Returns `InvalidBase` on the first offending character.
    pub fn from_bytes(bytes: Bytes) -> Result<Self> {
        for &b in bytes.iter() {
            Base::from_char(b as char)?;
        }
        Ok(Kmer(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The reverse complement of this k-mer: bases reversed, each
    /// complemented (A<->T, C<->G).
    pub fn reverse_complement(&self) -> Kmer {
        let rc: Vec<u8> = self.0.iter().rev().map(|&b| complement_byte(b)).collect();
        Kmer(Bytes::from(rc))
    }

    /// The canonical form: the lexicographically smaller of `self` and its
    /// reverse complement, under A<C<G<T ordering (which matches ASCII
    /// ordering for these four characters). Idempotent and rc-involutive.
    pub fn canonical(&self) -> Kmer {
        let rc = self.reverse_complement();
        if self.0 <= rc.0 {
            self.clone()
        } else {
            rc
        }
    }
}

impl std::fmt::Display for Kmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // bytes are validated ACGT-only at construction, so this is always
        // valid UTF-8.
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl std::str::FromStr for Kmer {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self> {
        Kmer::from_bytes(Bytes::from(s.as_bytes().to_vec()))
    }
}

fn complement_byte(b: u8) -> u8 {
    match b {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' => b'A',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base() {
        assert!("ACNT".parse::<Kmer>().is_err());
    }

    #[test]
    fn reverse_complement_known_value() {
        let k: Kmer = "ACGT".parse().unwrap();
        assert_eq!(k.reverse_complement().to_string(), "ACGT");

        let k: Kmer = "GTAC".parse().unwrap();
        assert_eq!(k.reverse_complement().to_string(), "GTAC");

        let k: Kmer = "AAAA".parse().unwrap();
        assert_eq!(k.reverse_complement().to_string(), "TTTT");
    }

    #[test]
    fn reverse_complement_is_involution() {
        let k: Kmer = "ACGTACGT".parse().unwrap();
        let rc = k.reverse_complement();
        assert_eq!(rc.reverse_complement(), k);
    }

    #[test]
    fn canonical_is_idempotent() {
        let k: Kmer = "TACG".parse().unwrap();
        let c1 = k.canonical();
        let c2 = c1.canonical();
        assert_eq!(c1, c2);
    }

    #[test]
    fn canonical_of_reverse_complement_matches_canonical() {
        let k: Kmer = "TACG".parse().unwrap();
        assert_eq!(k.canonical(), k.reverse_complement().canonical());
    }

    #[test]
    fn canonical_picks_lexicographically_smaller() {
        // CGTA vs its rc TACG -> CGTA is smaller
        let k: Kmer = "CGTA".parse().unwrap();
        assert_eq!(k.canonical().to_string(), "CGTA");

        // TACG vs its rc CGTA -> CGTA is smaller
        let k: Kmer = "TACG".parse().unwrap();
        assert_eq!(k.canonical().to_string(), "CGTA");
    }
}
