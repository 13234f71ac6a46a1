//! Two-branch accumulation used at every aggregation boundary.

use crate::base::constants::BLOCK_SEPARATOR;

/// Fold an ordered sequence of results without short-circuiting.
///
/// All successes give `Ok` with every value in input order. Any failure
/// gives `Err` with the errors of *every* failing item, in input order;
/// the successes are dropped.
pub fn accumulate<T, E, I>(results: I) -> Result<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = Result<T, Vec<E>>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();
    let mut failed = false;
    for result in results {
        match result {
            Ok(value) if !failed => values.push(value),
            Ok(_) => {}
            Err(mut errs) => {
                failed = true;
                values.clear();
                errors.append(&mut errs);
            }
        }
    }
    if failed {
        Err(errors)
    } else {
        Ok(values)
    }
}

/// [`accumulate`] text blocks, joining the successes with a blank line.
pub fn concat<E, I>(results: I) -> Result<String, Vec<E>>
where
    I: IntoIterator<Item = Result<String, Vec<E>>>,
{
    accumulate(results).map(|blocks| blocks.join(BLOCK_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_successes_keep_order() {
        let results: Vec<Result<String, Vec<u32>>> =
            vec![Ok("a".into()), Ok("b".into()), Ok("c".into())];
        assert_eq!(concat(results), Ok("a\n\nb\n\nc".to_string()));
    }

    #[test]
    fn test_failures_do_not_short_circuit() {
        let results: Vec<Result<&str, Vec<u32>>> =
            vec![Ok("a"), Err(vec![1, 2]), Ok("b"), Err(vec![3]), Ok("c")];
        assert_eq!(accumulate(results), Err(vec![1, 2, 3]));
    }

    #[test]
    fn test_failure_without_errors_still_fails() {
        let results: Vec<Result<&str, Vec<u32>>> = vec![Ok("a"), Err(Vec::new()), Ok("b")];
        assert_eq!(accumulate(results), Err(Vec::new()));
    }

    #[test]
    fn test_empty_sequence_is_empty_success() {
        let results: Vec<Result<String, Vec<u32>>> = Vec::new();
        assert_eq!(accumulate(results), Ok(Vec::<String>::new()));
    }
}
