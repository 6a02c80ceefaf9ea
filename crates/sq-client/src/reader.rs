//! Reading numeric columns out of downloaded containers.

use std::path::Path;

use crate::error::{ClientError, ClientResult};

/// One dataset's values with its original shape.
///
/// Values are widened to `f64` whatever the on-disk type; the shape is
/// row-major, matching the container layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    data: Vec<f64>,
    shape: Vec<usize>,
}

impl NumericArray {
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> ClientResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(ClientError::Container {
                what: format!(
                    "shape {shape:?} implies {expected} values, dataset has {}",
                    data.len()
                ),
            });
        }
        Ok(Self { data, shape })
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of rows (length of the leading axis).
    pub fn rows(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Multiply every value in place.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }
}

/// Opens downloaded container files.
///
/// The one seam behind which the heavy format binding lives; tests plug in
/// an in-memory implementation instead.
pub trait ContainerFormat {
    fn open(&self, path: &Path) -> ClientResult<Box<dyn ContainerRead>>;
}

/// One open container.
pub trait ContainerRead {
    /// Read dataset `name` inside `group`, or at the root for `None`.
    fn read(&self, group: Option<&str>, name: &str) -> ClientResult<NumericArray>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_must_match_the_data_length() {
        assert!(NumericArray::new(vec![1.0, 2.0, 3.0], vec![3]).is_ok());
        assert!(NumericArray::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).is_ok());
        assert!(NumericArray::new(vec![1.0, 2.0], vec![3]).is_err());
    }

    #[test]
    fn scale_multiplies_every_value() {
        let mut arr = NumericArray::new(vec![1.0, 2.0, 4.0], vec![3]).unwrap();
        arr.scale(0.5);
        assert_eq!(arr.data(), &[0.5, 1.0, 2.0]);
    }

    #[test]
    fn rows_follow_the_leading_axis() {
        let arr = NumericArray::new(vec![0.0; 6], vec![2, 3]).unwrap();
        assert_eq!(arr.rows(), 2);
        let empty = NumericArray::new(vec![], vec![0]).unwrap();
        assert_eq!(empty.rows(), 0);
    }
}
