pub mod implicit;
pub mod scalar;

use implicit::implicit_cast_score;
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_error::{MeridianError, Result};

/// Function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Expected input types for this signature.
    pub input: &'static [DataTypeId],

    /// Type of the variadic arguments if this function is variadic.
    ///
    /// If None, the signature is not considered variadic. Variadic arguments
    /// come after the fixed `input` arguments, and a variadic signature will
    /// accept any number of them (including zero).
    pub variadic: Option<DataTypeId>,

    /// The expected return type.
    ///
    /// This is purely informational (and could be used for documentation). The
    /// concrete data type is determined by the planned function.
    pub return_type: DataTypeId,
}

impl Signature {
    /// Check if this signature is a variadic signature.
    pub const fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Return if inputs given data types exactly satisfy the signature.
    fn exact_match(&self, inputs: &[DataType]) -> bool {
        if self.is_variadic() {
            if inputs.len() < self.input.len() {
                return false;
            }
        } else if self.input.len() != inputs.len() {
            return false;
        }

        for (&expected, have) in self.input.iter().zip(inputs.iter()) {
            if have.datatype_id() != expected {
                return false;
            }
        }

        if let Some(variadic) = self.variadic {
            for have in &inputs[self.input.len()..] {
                if have.datatype_id() != variadic {
                    return false;
                }
            }
        }

        true
    }
}

/// Trait for defining informating about functions.
pub trait FunctionInfo {
    /// Name of the function.
    fn name(&self) -> &'static str;

    /// Aliases for the function.
    ///
    /// When the system catalog is initialized, the function will be placed into
    /// the catalog using both its name and all of its aliases.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Signatures for the function.
    ///
    /// This is used during binding to determine the return type for a function
    /// given some inputs, and how we should handle implicit casting.
    fn signatures(&self) -> &[Signature];

    /// Get the return type for this function if the inputs have an exact
    /// signature match.
    ///
    /// If there are no exact signatures for these types, None will be returned.
    fn return_type_for_inputs(&self, inputs: &[DataType]) -> Option<DataTypeId> {
        let sig = self
            .signatures()
            .iter()
            .find(|sig| sig.exact_match(inputs))?;

        Some(sig.return_type)
    }

    /// Get candidate signatures for this function given the input datatypes.
    ///
    /// The returned candidates will have info on which arguments need to be
    /// casted and which are fine to state as-is.
    fn candidate_signatures(&self, inputs: &[DataType]) -> Vec<CandidateSignature> {
        CandidateSignature::find_candidates(inputs, self.signatures())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CastType {
    /// Need to cast the type to this one.
    Cast { to: DataTypeId, score: i32 },

    /// Casting isn't needed, the original data type works.
    NoCastNeeded,
}

/// Score contributed by an argument that already has the wanted type.
///
/// Higher than any implicit cast score so that candidates keeping more
/// arguments as-is win out over candidates casting more of them.
const NO_CAST_SCORE: i32 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSignature {
    /// Index of the signature.
    pub signature_idx: usize,

    /// Casts that would need to be applied in order to satisfy the signature.
    pub casts: Vec<CastType>,
}

impl CandidateSignature {
    /// Total score for this candidate. Higher is a better fit for the inputs
    /// we have.
    pub fn total_score(&self) -> i32 {
        self.casts
            .iter()
            .map(|cast| match cast {
                CastType::Cast { score, .. } => *score,
                CastType::NoCastNeeded => NO_CAST_SCORE,
            })
            .sum()
    }

    /// Find candidate signatures for the given datatypes.
    fn find_candidates(inputs: &[DataType], sigs: &[Signature]) -> Vec<Self> {
        let mut candidates = Vec::new();

        let mut buf = Vec::new();
        for (idx, sig) in sigs.iter().enumerate() {
            if !Self::compare_and_fill_types(inputs, sig, &mut buf) {
                continue;
            }

            candidates.push(CandidateSignature {
                signature_idx: idx,
                casts: std::mem::take(&mut buf),
            })
        }

        candidates
    }

    /// Compare the types we have with the types the signature wants, filling
    /// the provided buffer with the cast type for every argument.
    ///
    /// Returns true if everything is able to be implicitly cast, false otherwise.
    fn compare_and_fill_types(have: &[DataType], sig: &Signature, buf: &mut Vec<CastType>) -> bool {
        if sig.is_variadic() {
            if have.len() < sig.input.len() {
                return false;
            }
        } else if have.len() != sig.input.len() {
            return false;
        }
        buf.clear();

        let variadic = sig.variadic.into_iter().cycle();
        let want = sig.input.iter().copied().chain(variadic);

        for (have, want) in have.iter().zip(want) {
            if have.datatype_id() == want {
                buf.push(CastType::NoCastNeeded);
                continue;
            }

            let score = implicit_cast_score(have, want);
            if score > 0 {
                buf.push(CastType::Cast { to: want, score });
                continue;
            }

            return false;
        }

        true
    }
}

/// Check the number of arguments provided, erroring if it doesn't match the
/// expected number of arguments.
pub fn plan_check_num_args<F: FunctionInfo + ?Sized>(
    func: &F,
    inputs: &[DataType],
    expected: usize,
) -> Result<()> {
    if inputs.len() != expected {
        return Err(MeridianError::new(format!(
            "Expected {} input for '{}', received {}",
            expected,
            func.name(),
            inputs.len(),
        )));
    }
    Ok(())
}

/// Return an error indicating the input types we got are not ones we can
/// handle.
// TODO: Include valid signatures in the error
pub fn invalid_input_types_error<F: FunctionInfo + ?Sized>(
    func: &F,
    got: &[&DataType],
) -> MeridianError {
    let got_types = got
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    MeridianError::new(format!(
        "Got invalid type(s) '{}' for '{}'",
        got_types,
        func.name()
    ))
}
