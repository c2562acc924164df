use pa_scoring::Score;
use std::ops::{Index, IndexMut};

/// A dense `rows x cols` grid of scores in a single allocation, stored row by row.
#[derive(Clone, Debug)]
pub struct Matrix {
    cols: usize,
    data: Vec<Score>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, value: Score) -> Self {
        Self {
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn row(&self, i: usize) -> &[Score] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Score;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Score {
        debug_assert!(j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Score {
        debug_assert!(j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}
