//! Reed-Solomon forward error correction over GF(2^m), m = 3..8.
//!
//! The codec operates on shortened codewords: data shorter than the field's
//! native block length `2^m - 1` is logically left-padded with zero symbols
//! that are never stored. Syndrome evaluation, Chien search, and the Forney
//! corrections all account for that virtual padding, which lets one table set
//! serve arbitrarily small data sizes.

use thiserror::Error;

/// Alpha exponent of the first generator-polynomial root.
const FIRST_ROOT: usize = 1;

/// Largest parity size supported by the fixed-capacity decoder scratch.
pub const MAX_PARITY: usize = 8;

// Primitive polynomials per symbol size, coefficients of x^0..x^m.
// See Lin & Costello, Error Control Coding, Appendix A.
const PP_3: [u8; 4] = [1, 1, 0, 1]; // 1 + x + x^3
const PP_4: [u8; 5] = [1, 1, 0, 0, 1]; // 1 + x + x^4
const PP_5: [u8; 6] = [1, 0, 1, 0, 0, 1]; // 1 + x^2 + x^5
const PP_6: [u8; 7] = [1, 1, 0, 0, 0, 0, 1]; // 1 + x + x^6
const PP_7: [u8; 8] = [1, 0, 0, 1, 0, 0, 0, 1]; // 1 + x^3 + x^7
const PP_8: [u8; 9] = [1, 0, 1, 1, 1, 0, 0, 0, 1]; // 1 + x^2 + x^3 + x^4 + x^8

/// Invalid codec parameters passed to [`ReedSolomon::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FecParamsError {
    #[error("unsupported symbol size {0}, expected 3..=8")]
    UnsupportedSymbolSize(usize),
    #[error("block size {block_size} outside 1..={max}")]
    BlockSizeOutOfRange { block_size: usize, max: usize },
    #[error("data size {data_size} outside 1..{block_size}")]
    InvalidDataSize { data_size: usize, block_size: usize },
    #[error("parity size {0} exceeds the supported maximum of {MAX_PARITY}")]
    ParitySizeTooLarge(usize),
}

/// The received block holds more errors than the parity can locate, or an
/// error landed in the virtual zero padding, which has no storage to fix.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("uncorrectable codeword")]
pub struct Uncorrectable;

/// A Reed-Solomon codec for a fixed `(symbol_size, data_size, parity_size)`.
///
/// All derived state (log/antilog tables, generator polynomial) is frozen at
/// construction; encode and correct calls take `&self` and the codec can be
/// shared freely across threads.
///
/// Symbols are passed as bytes and must lie in `[0, 2^symbol_size)`.
#[derive(Clone, Debug)]
pub struct ReedSolomon {
    /// Field block length `2^m - 1`; doubles as the index-form zero sentinel.
    nn: usize,
    zero_size: usize,
    data_size: usize,
    parity_size: usize,
    block_size: usize,
    /// Index form to polynomial form: `alpha_to[i] = alpha^i`.
    alpha_to: Vec<u8>,
    /// Polynomial form to index form: `index_of[alpha^i] = i`.
    index_of: Vec<u8>,
    /// Generator polynomial `(x-alpha^1)...(x-alpha^r)`, index form.
    gen: Vec<u8>,
}

impl ReedSolomon {
    /// Build a codec for `data_size + parity_size` symbol blocks.
    ///
    /// Fails if the symbol size is outside 3..=8, the block does not fit the
    /// field, the data size leaves no room for parity, or the parity size
    /// exceeds [`MAX_PARITY`] (the decoder scratch is fixed-capacity).
    pub fn new(
        symbol_size: usize,
        data_size: usize,
        parity_size: usize,
    ) -> Result<Self, FecParamsError> {
        let pp: &[u8] = match symbol_size {
            3 => &PP_3,
            4 => &PP_4,
            5 => &PP_5,
            6 => &PP_6,
            7 => &PP_7,
            8 => &PP_8,
            _ => return Err(FecParamsError::UnsupportedSymbolSize(symbol_size)),
        };

        let nn = (1usize << symbol_size) - 1;
        let block_size = data_size + parity_size;
        if block_size < 1 || block_size > nn {
            return Err(FecParamsError::BlockSizeOutOfRange {
                block_size,
                max: nn,
            });
        }
        if data_size < 1 || data_size >= block_size {
            return Err(FecParamsError::InvalidDataSize {
                data_size,
                block_size,
            });
        }
        if parity_size > MAX_PARITY {
            return Err(FecParamsError::ParitySizeTooLarge(parity_size));
        }

        let mut codec = Self {
            nn,
            zero_size: nn - block_size,
            data_size,
            parity_size,
            block_size,
            alpha_to: vec![0; nn + 1],
            index_of: vec![0; nn + 1],
            gen: vec![0; parity_size + 1],
        };
        codec.init_galois_field(symbol_size, pp);
        codec.init_generator();
        Ok(codec)
    }

    /// Number of data symbols per block.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Number of parity symbols per block.
    #[inline]
    pub fn parity_size(&self) -> usize {
        self.parity_size
    }

    /// Total block length, data plus parity.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Maximum number of symbol errors a block can absorb.
    #[inline]
    pub fn correction_capacity(&self) -> usize {
        self.parity_size / 2
    }

    #[inline]
    fn modnn(&self, x: usize) -> usize {
        x % self.nn
    }

    /// Build the log/antilog tables from the primitive polynomial.
    ///
    /// Elements live in two representations: index form (the power of the
    /// primitive element, convenient for multiplication) and polynomial form
    /// (bit coefficients, convenient for addition). No index-form value
    /// represents zero, so `nn` stands in as a sentinel.
    fn init_galois_field(&mut self, symbol_size: usize, pp: &[u8]) {
        let nn = self.nn;
        let mut mask: usize = 1;
        self.alpha_to[symbol_size] = 0;
        for i in 0..symbol_size {
            self.alpha_to[i] = mask as u8;
            self.index_of[mask] = i as u8;
            if pp[i] != 0 {
                self.alpha_to[symbol_size] ^= mask as u8;
            }
            mask <<= 1;
        }
        self.index_of[self.alpha_to[symbol_size] as usize] = symbol_size as u8;
        mask >>= 1;
        for i in symbol_size + 1..nn {
            self.alpha_to[i] = if usize::from(self.alpha_to[i - 1]) >= mask {
                self.alpha_to[symbol_size] ^ (((usize::from(self.alpha_to[i - 1]) ^ mask) << 1) as u8)
            } else {
                self.alpha_to[i - 1] << 1
            };
            self.index_of[self.alpha_to[i] as usize] = i as u8;
        }
        self.index_of[0] = nn as u8;
        self.alpha_to[nn] = 0;
    }

    /// Expand `(x-alpha^1)(x-alpha^2)...(x-alpha^r)` and store it in index
    /// form for the encoder's feedback taps.
    fn init_generator(&mut self) {
        let r = self.parity_size;
        self.gen[0] = self.alpha_to[FIRST_ROOT];
        self.gen[1] = 1;
        for i in 2..=r {
            self.gen[i] = 1;
            for j in (1..i).rev() {
                self.gen[j] = if self.gen[j] != 0 {
                    self.gen[j - 1]
                        ^ self.alpha_to[self
                            .modnn(usize::from(self.index_of[self.gen[j] as usize]) + FIRST_ROOT + i - 1)]
                } else {
                    self.gen[j - 1]
                };
            }
            self.gen[0] = self.alpha_to
                [self.modnn(usize::from(self.index_of[self.gen[0] as usize]) + FIRST_ROOT + i - 1)];
        }
        for g in self.gen.iter_mut() {
            *g = self.index_of[*g as usize];
        }
    }

    /// Encode parity for `data_size` data symbols.
    ///
    /// Runs a feedback shift register over the data stream as if the block
    /// were zero-padded out to the full field length; the virtual zeros feed
    /// no energy into the register, so only real symbols shape the parity.
    ///
    /// Panics if `data` is not exactly `data_size` long.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        assert_eq!(data.len(), self.data_size, "data length mismatch");
        let az = self.nn;
        let r = self.parity_size;
        let mut parity = vec![0u8; r];

        for i in (0..self.zero_size + self.data_size).rev() {
            let symbol = if i >= self.zero_size {
                data[i - self.zero_size]
            } else {
                0
            };
            let feedback = usize::from(self.index_of[usize::from(symbol ^ parity[r - 1])]);
            if feedback != az {
                for j in (1..r).rev() {
                    parity[j] = if usize::from(self.gen[j]) != az {
                        parity[j - 1] ^ self.alpha_to[self.modnn(usize::from(self.gen[j]) + feedback)]
                    } else {
                        parity[j - 1]
                    };
                }
                parity[0] = self.alpha_to[self.modnn(usize::from(self.gen[0]) + feedback)];
            } else {
                for j in (1..r).rev() {
                    parity[j] = parity[j - 1];
                }
                parity[0] = 0;
            }
        }

        parity
    }

    /// Correct `block` (data followed by parity) in place.
    ///
    /// Computes the syndromes at `alpha^1..alpha^r`; if all are zero the
    /// block is returned untouched. Otherwise Berlekamp-Massey produces the
    /// error locator, a Chien search over every field element finds its
    /// roots, and the Forney formula yields the magnitudes XORed back into
    /// the block. Fails when the root count disagrees with the locator
    /// degree (too many errors) or when an error position falls inside the
    /// virtual zero padding, which has no storage to correct.
    ///
    /// Panics if `block` is not exactly `block_size` long.
    pub fn correct(&self, block: &mut [u8]) -> Result<(), Uncorrectable> {
        assert_eq!(block.len(), self.block_size, "block length mismatch");
        let nn = self.nn;
        let az = nn; // index-form zero sentinel
        let r = self.parity_size;

        // Syndromes at the generator roots, index form in s[1..=r]. The
        // zero-padded positions contribute nothing and are skipped outright.
        let mut syndromes = [0usize; MAX_PARITY + 1];
        let mut syn_error = 0usize;
        for (i, slot) in syndromes.iter_mut().enumerate().take(r + 1).skip(1) {
            let mut syndrome = 0usize;
            for (j, &symbol) in block.iter().enumerate() {
                if symbol != 0 {
                    let position = self.zero_size + j;
                    syndrome ^= usize::from(
                        self.alpha_to[self.modnn(
                            usize::from(self.index_of[usize::from(symbol)])
                                + (FIRST_ROOT + i - 1) * position,
                        )],
                    );
                }
            }
            syn_error |= syndrome;
            *slot = usize::from(self.index_of[syndrome]);
        }
        if syn_error == 0 {
            return Ok(());
        }

        // Berlekamp-Massey: grow the error locator lambda(x) one syndrome at
        // a time. lambda is kept in polynomial form here, b and t follow the
        // usual auxiliary roles.
        let mut lambda = [0usize; MAX_PARITY + 1];
        lambda[0] = 1;
        let mut b = [0usize; MAX_PARITY + 1];
        let mut t = [0usize; MAX_PARITY + 1];
        for i in 0..=r {
            b[i] = usize::from(self.index_of[lambda[i]]);
        }

        let mut el = 0usize;
        for step in 1..=r {
            let mut discrepancy = 0usize;
            for i in 0..step {
                if lambda[i] != 0 && syndromes[step - i] != az {
                    discrepancy ^= usize::from(
                        self.alpha_to
                            [self.modnn(usize::from(self.index_of[lambda[i]]) + syndromes[step - i])],
                    );
                }
            }
            let discrepancy = usize::from(self.index_of[discrepancy]);

            if discrepancy == az {
                for i in (0..r).rev() {
                    b[i + 1] = b[i];
                }
                b[0] = az;
            } else {
                // t(x) <- lambda(x) - discrepancy * x * b(x)
                t[0] = lambda[0];
                for i in 0..r {
                    t[i + 1] = if b[i] != az {
                        lambda[i + 1] ^ usize::from(self.alpha_to[self.modnn(discrepancy + b[i])])
                    } else {
                        lambda[i + 1]
                    };
                }
                if 2 * el <= step - 1 {
                    el = step - el;
                    // b(x) <- inv(discrepancy) * lambda(x)
                    for i in 0..=r {
                        b[i] = if lambda[i] == 0 {
                            az
                        } else {
                            self.modnn(usize::from(self.index_of[lambda[i]]) + nn - discrepancy)
                        };
                    }
                } else {
                    for i in (0..r).rev() {
                        b[i + 1] = b[i];
                    }
                    b[0] = az;
                }
                lambda[..=r].copy_from_slice(&t[..=r]);
            }
        }

        // Convert lambda to index form and find its degree.
        let mut deg_lambda = 0usize;
        for (i, coeff) in lambda.iter_mut().enumerate().take(r + 1) {
            *coeff = usize::from(self.index_of[*coeff]);
            if *coeff != az {
                deg_lambda = i;
            }
        }

        // Chien search: evaluate lambda at every field element. reg holds the
        // running per-coefficient exponents, stepped once per element.
        let mut reg = [0usize; MAX_PARITY + 1];
        reg[1..=r].copy_from_slice(&lambda[1..=r]);
        let mut roots = [0usize; MAX_PARITY];
        let mut locations = [0usize; MAX_PARITY];
        let mut count = 0usize;
        for i in 1..=nn {
            let mut q = 1usize;
            for j in (1..=deg_lambda).rev() {
                if reg[j] != az {
                    reg[j] = self.modnn(reg[j] + j);
                    q ^= usize::from(self.alpha_to[reg[j]]);
                }
            }
            if q == 0 {
                roots[count] = i;
                locations[count] = nn - i;
                count += 1;
            }
        }
        if deg_lambda != count {
            log::trace!("uncorrectable block: {count} roots for a degree-{deg_lambda} locator");
            return Err(Uncorrectable);
        }

        // Error evaluator omega(x) = s(x) * lambda(x) mod x^r, index form.
        let mut omega = [0usize; MAX_PARITY + 1];
        let mut deg_omega = 0usize;
        for i in 0..r {
            let mut tmp = 0usize;
            for j in (0..=deg_lambda.min(i)).rev() {
                if syndromes[i + 1 - j] != az && lambda[j] != az {
                    tmp ^= usize::from(
                        self.alpha_to[self.modnn(syndromes[i + 1 - j] + lambda[j])],
                    );
                }
            }
            if tmp != 0 {
                deg_omega = i;
            }
            omega[i] = usize::from(self.index_of[tmp]);
        }
        omega[r] = az;

        // Forney: magnitude at each root is omega(root) / lambda'(root).
        for j in (0..count).rev() {
            let mut num1 = 0usize;
            for i in (0..=deg_omega).rev() {
                if omega[i] != az {
                    num1 ^= usize::from(self.alpha_to[self.modnn(omega[i] + i * roots[j])]);
                }
            }
            let num2 = usize::from(self.alpha_to[self.modnn(roots[j] * (FIRST_ROOT - 1) + nn)]);

            // The odd coefficients of lambda form its formal derivative.
            let mut den = 0usize;
            for i in (0..=deg_lambda.min(r - 1) & !1).rev().step_by(2) {
                if lambda[i + 1] != az {
                    den ^= usize::from(self.alpha_to[self.modnn(lambda[i + 1] + i * roots[j])]);
                }
            }
            if den == 0 {
                return Err(Uncorrectable);
            }

            if num1 != 0 {
                // The padding carries no storage; an error located there
                // means the block is beyond repair.
                if locations[j] < self.zero_size {
                    return Err(Uncorrectable);
                }
                block[locations[j] - self.zero_size] ^= self.alpha_to[self.modnn(
                    usize::from(self.index_of[num1]) + usize::from(self.index_of[num2]) + nn
                        - usize::from(self.index_of[den]),
                )];
            }
        }

        Ok(())
    }
}
