use crate::{
    error::{MatrixIncompleteError, ProblemError, ValidationError},
    problem::{location::LocationIdx, time_of_day::Minutes},
};

/// Dense travel times in minutes, stored flat: `index = from * num_locations + to`.
#[derive(Debug, Clone)]
pub struct TravelTimeMatrix {
    times: Vec<Minutes>,
    num_locations: usize,
}

impl TravelTimeMatrix {
    /// Builds the matrix from rows where a `None` entry is a travel time the source
    /// could not provide. A single missing entry rejects the whole matrix.
    pub fn try_from_rows(rows: Vec<Vec<Option<Minutes>>>) -> Result<Self, ProblemError> {
        let num_locations = rows.len();
        let mut times = Vec::with_capacity(num_locations * num_locations);

        for (origin, row) in rows.into_iter().enumerate() {
            if row.len() != num_locations {
                return Err(ValidationError::MatrixRowLength {
                    row: origin,
                    expected: num_locations,
                    actual: row.len(),
                }
                .into());
            }

            for (destination, value) in row.into_iter().enumerate() {
                let value = value.ok_or(MatrixIncompleteError {
                    origin,
                    destination,
                })?;

                if origin == destination && value != 0 {
                    return Err(ValidationError::MatrixDiagonal {
                        index: origin,
                        value,
                    }
                    .into());
                }

                if value < 0 {
                    return Err(ValidationError::NegativeTravelTime {
                        from: origin,
                        to: destination,
                        value,
                    }
                    .into());
                }

                times.push(value);
            }
        }

        Ok(Self::from_flat(times, num_locations))
    }

    pub fn try_new(rows: Vec<Vec<Minutes>>) -> Result<Self, ProblemError> {
        Self::try_from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    fn from_flat(times: Vec<Minutes>, num_locations: usize) -> Self {
        TravelTimeMatrix {
            times,
            num_locations,
        }
    }

    #[cfg(test)]
    pub fn from_constant(num_locations: usize, time: Minutes) -> Self {
        let mut times = vec![time; num_locations * num_locations];
        for i in 0..num_locations {
            times[i * num_locations + i] = 0;
        }
        Self::from_flat(times, num_locations)
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> Minutes {
        self.times[self.index(from, to)]
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_time_lookup() {
        let matrix = TravelTimeMatrix::try_new(vec![vec![0, 5, 7], vec![6, 0, 3], vec![7, 4, 0]])
            .unwrap();

        assert_eq!(matrix.num_locations(), 3);
        assert_eq!(matrix.travel_time(0.into(), 1.into()), 5);
        assert_eq!(matrix.travel_time(1.into(), 0.into()), 6);
        assert_eq!(matrix.travel_time(2.into(), 1.into()), 4);
    }

    #[test]
    fn test_missing_entry_is_reported() {
        let result = TravelTimeMatrix::try_from_rows(vec![
            vec![Some(0), Some(5)],
            vec![None, Some(0)],
        ]);

        assert_eq!(
            result.unwrap_err(),
            ProblemError::MatrixIncomplete(MatrixIncompleteError {
                origin: 1,
                destination: 0
            })
        );
    }

    #[test]
    fn test_ragged_row() {
        let result = TravelTimeMatrix::try_new(vec![vec![0, 5], vec![5]]);

        assert_eq!(
            result.unwrap_err(),
            ProblemError::Validation(ValidationError::MatrixRowLength {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_non_zero_diagonal() {
        let result = TravelTimeMatrix::try_new(vec![vec![0, 5], vec![5, 2]]);

        assert_eq!(
            result.unwrap_err(),
            ProblemError::Validation(ValidationError::MatrixDiagonal { index: 1, value: 2 })
        );
    }

    #[test]
    fn test_constant_matrix() {
        let matrix = TravelTimeMatrix::from_constant(4, 10);

        assert_eq!(matrix.travel_time(3.into(), 3.into()), 0);
        assert_eq!(matrix.travel_time(0.into(), 3.into()), 10);
    }
}
