use crate::problem::location::LocationIdx;

/// Dense `(from, to)` penalty counters for the guided local search, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcPenalties {
    data: Vec<u32>,
    num_locations: usize,
}

impl ArcPenalties {
    pub fn new(num_locations: usize) -> Self {
        ArcPenalties {
            data: vec![0; num_locations * num_locations],
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        debug_assert!(from.get() < self.num_locations && to.get() < self.num_locations);
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn get(&self, from: LocationIdx, to: LocationIdx) -> u32 {
        self.data[self.index(from, to)]
    }

    #[inline]
    pub fn increment(&mut self, from: LocationIdx, to: LocationIdx) {
        let index = self.index(from, to);
        self.data[index] = self.data[index].saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_is_directed() {
        let mut penalties = ArcPenalties::new(3);
        assert_eq!(penalties.get(1.into(), 2.into()), 0);

        penalties.increment(1.into(), 2.into());
        penalties.increment(1.into(), 2.into());

        assert_eq!(penalties.get(1.into(), 2.into()), 2);
        assert_eq!(penalties.get(2.into(), 1.into()), 0);
    }
}
