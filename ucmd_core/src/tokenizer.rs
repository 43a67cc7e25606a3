//! Argument splitting.
//!
//! Splits on every occurrence of a single delimiter char. Consecutive
//! delimiters are not merged: `"a  b"` with `' '` gives `["a", "", "b"]`.
//! Tokens are borrowed slices of the input; no quoting, no escaping, no
//! type coercion.

use heapless::Vec;

use crate::error::CmdError;

/// Bounded list of argument tokens borrowed from the input line.
pub type Args<'a, const N: usize> = Vec<&'a str, N>;

/// Number of `delimiter` occurrences in `text`.
pub fn count_delimiters(text: &str, delimiter: char) -> usize {
    text.matches(delimiter).count()
}

/// Split `text` into at most `N` tokens.
///
/// `text` is trimmed first and must not end up empty ([`CmdError::NoArgs`]).
/// With `d` delimiters the result holds exactly `d + 1` tokens; if that is more
/// than `N`, nothing is stored and [`CmdError::ArgLimitExceeded`] is returned.
pub fn split_args<const N: usize>(text: &str, delimiter: char) -> Result<Args<'_, N>, CmdError> {
    let mut rest = text.trim();
    if rest.is_empty() {
        return Err(CmdError::NoArgs);
    }

    let delimiter_count = count_delimiters(rest, delimiter);
    if delimiter_count >= N {
        warn!("{} args exceed the limit of {}", delimiter_count + 1, N);
        return Err(CmdError::ArgLimitExceeded { limit: N });
    }

    let mut args = Args::<N>::new();
    for _ in 0..delimiter_count {
        // delimiter_count was taken from `rest`, so the split cannot miss
        let Some((token, tail)) = rest.split_once(delimiter) else {
            break;
        };
        args.push(token).map_err(|_| CmdError::ArgLimitExceeded { limit: N })?;
        rest = tail;
    }
    // whatever follows the last delimiter is the final token
    args.push(rest).map_err(|_| CmdError::ArgLimitExceeded { limit: N })?;

    trace!("split {} args", args.len());
    Ok(args)
}
