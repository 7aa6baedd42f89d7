//! Combinators that decode typed values out of a flat list of field elements.
//!
//! Every decoder takes the remaining parameters and returns the decoded value
//! together with the number of elements it consumed. Composite decoders rely
//! on those counts to advance a shared cursor, so a decoder must always report
//! exactly how many slots it used.

use feltscan_sdk::Felt;
use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised while decoding event parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer field elements remain than the shape requires.
    #[error("insufficient parameters: needed {needed}, {available} available")]
    InsufficientParameters { needed: usize, available: usize },
}

/// Decoded value and number of field elements consumed.
pub type Decoded<T> = Result<(T, usize), DecodeError>;

fn require(parameters: &[Felt], needed: usize) -> Result<(), DecodeError> {
    if parameters.len() < needed {
        return Err(DecodeError::InsufficientParameters {
            needed,
            available: parameters.len(),
        });
    }
    Ok(())
}

/// Decodes one element as an unsigned 64-bit integer (truncating).
pub fn parse_u64(parameters: &[Felt]) -> Decoded<u64> {
    require(parameters, 1)?;
    Ok((parameters[0].to_u64(), 1))
}

/// Decodes one element as an exact arbitrary-precision integer.
pub fn parse_big_int(parameters: &[Felt]) -> Decoded<BigUint> {
    require(parameters, 1)?;
    Ok((parameters[0].to_biguint(), 1))
}

/// Decodes one element as its canonical hex string. Used where a felt stands
/// in for an address or short string.
pub fn parse_string(parameters: &[Felt]) -> Decoded<String> {
    require(parameters, 1)?;
    Ok((parameters[0].to_hex_str(), 1))
}

/// Lifts an element decoder into a decoder of length-prefixed arrays.
///
/// The first element is the item count `n`; the items follow back to back,
/// each taking as many slots as `parser` reports. Total consumption is
/// `1 + sum(item consumption)`.
pub fn parse_array<T, F>(parser: F) -> impl Fn(&[Felt]) -> Decoded<Vec<T>>
where
    F: Fn(&[Felt]) -> Decoded<T>,
{
    move |parameters: &[Felt]| {
        let (declared, _) = parse_u64(parameters)?;
        let available = parameters.len() - 1;
        // Every item occupies at least one slot.
        let len = match usize::try_from(declared) {
            Ok(len) if len <= available => len,
            _ => {
                return Err(DecodeError::InsufficientParameters {
                    needed: usize::try_from(declared)
                        .map_or(usize::MAX, |n| n.saturating_add(1)),
                    available: parameters.len(),
                });
            }
        };

        let mut reader = FeltReader::new(&parameters[1..]);
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(reader.read(&parser)?);
        }

        Ok((items, 1 + reader.consumed()))
    }
}

/// Left-to-right cursor over a parameter list, shared by the fields of a
/// struct decode.
#[derive(Debug, Clone)]
pub struct FeltReader<'a> {
    parameters: &'a [Felt],
    position: usize,
}

impl<'a> FeltReader<'a> {
    pub fn new(parameters: &'a [Felt]) -> Self {
        Self {
            parameters,
            position: 0,
        }
    }

    /// Decodes the next value and advances past the elements it consumed.
    pub fn read<T, F>(&mut self, parser: F) -> Result<T, DecodeError>
    where
        F: Fn(&[Felt]) -> Decoded<T>,
    {
        let (value, consumed) = parser(self.remaining())?;
        self.position += consumed;
        Ok(value)
    }

    pub fn remaining(&self) -> &'a [Felt] {
        &self.parameters[self.position.min(self.parameters.len())..]
    }

    /// Number of elements consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn felts(values: &[u64]) -> Vec<Felt> {
        values.iter().copied().map(Felt::from).collect()
    }

    #[test]
    fn scalars_consume_one_element() {
        let params = felts(&[7, 8]);
        assert_eq!(parse_u64(&params).unwrap(), (7, 1));
        assert_eq!(parse_big_int(&params).unwrap(), (BigUint::from(7u8), 1));
        assert_eq!(parse_string(&params).unwrap(), ("0x7".to_owned(), 1));
    }

    #[test]
    fn scalars_require_an_element() {
        assert_matches!(
            parse_u64(&[]),
            Err(DecodeError::InsufficientParameters { needed: 1, available: 0 })
        );
        parse_big_int(&[]).unwrap_err();
        parse_string(&[]).unwrap_err();
    }

    #[test]
    fn empty_array_consumes_its_length_prefix() {
        let params = felts(&[0, 99]);
        assert_eq!(parse_array(parse_u64)(&params).unwrap(), (vec![], 1));
    }

    #[test]
    fn array_declaring_more_items_than_available_fails() {
        let params = felts(&[3, 1, 2]);
        assert_matches!(
            parse_array(parse_u64)(&params),
            Err(DecodeError::InsufficientParameters { needed: 4, available: 3 })
        );
    }

    #[test]
    fn array_with_absurd_length_fails() {
        let params = vec![Felt::from(u64::MAX), Felt::from(1)];
        parse_array(parse_u64)(&params).unwrap_err();
    }

    #[test]
    fn nested_arrays_account_for_variable_width_items() {
        // [[1, 2], [], [3]] followed by a trailing scalar.
        let params = felts(&[3, 2, 1, 2, 0, 1, 3, 42]);
        let parser = parse_array(parse_array(parse_u64));
        let (value, consumed) = parser(&params).unwrap();
        assert_eq!(value, vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(consumed, 7);

        let mut reader = FeltReader::new(&params);
        reader.read(&parser).unwrap();
        assert_eq!(reader.read(parse_u64).unwrap(), 42);
        assert_eq!(reader.consumed(), 8);
    }

    #[test]
    fn nested_array_runs_out_in_inner_item() {
        // Outer array claims 2 items but the second inner array is truncated.
        let params = felts(&[2, 1, 5, 3, 6]);
        assert_matches!(
            parse_array(parse_array(parse_u64))(&params),
            Err(DecodeError::InsufficientParameters { .. })
        );
    }

    proptest! {
        #[test]
        fn array_of_scalars_consumes_prefix_plus_items(
            values in proptest::collection::vec(any::<u64>(), 0..32),
            trailing in proptest::collection::vec(any::<u64>(), 0..4),
        ) {
            let mut params = vec![Felt::from(values.len() as u64)];
            params.extend(values.iter().copied().map(Felt::from));
            params.extend(trailing.iter().copied().map(Felt::from));

            let (decoded, consumed) = parse_array(parse_u64)(&params).unwrap();
            prop_assert_eq!(consumed, 1 + values.len());
            prop_assert_eq!(decoded, values);
        }

        #[test]
        fn array_of_arrays_consumes_sum_of_item_widths(
            values in proptest::collection::vec(proptest::collection::vec(any::<u64>(), 0..5), 0..8),
        ) {
            let mut params = vec![Felt::from(values.len() as u64)];
            for inner in &values {
                params.push(Felt::from(inner.len() as u64));
                params.extend(inner.iter().copied().map(Felt::from));
            }

            let (decoded, consumed) = parse_array(parse_array(parse_u64))(&params).unwrap();
            let expected = 1 + values.iter().map(|inner| 1 + inner.len()).sum::<usize>();
            prop_assert_eq!(consumed, expected);
            prop_assert_eq!(decoded, values);
        }
    }
}
