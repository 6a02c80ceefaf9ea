//! Container reading backed by the `hdf5` crate.
//!
//! Gated behind the `hdf5` cargo feature so the default build has no native
//! library requirement; everything above the [`ContainerFormat`] seam works
//! without it.

use std::path::Path;

use crate::error::{ClientError, ClientResult};
use crate::reader::{ContainerFormat, ContainerRead, NumericArray};

/// Factory handing out [`Hdf5Container`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hdf5Format;

pub struct Hdf5Container {
    file: ::hdf5::File,
}

impl ContainerFormat for Hdf5Format {
    fn open(&self, path: &Path) -> ClientResult<Box<dyn ContainerRead>> {
        let file = ::hdf5::File::open(path).map_err(container_err)?;
        Ok(Box::new(Hdf5Container { file }))
    }
}

impl ContainerRead for Hdf5Container {
    fn read(&self, group: Option<&str>, name: &str) -> ClientResult<NumericArray> {
        let dataset = match group {
            Some(group) => self
                .file
                .group(group)
                .map_err(container_err)?
                .dataset(name),
            None => self.file.dataset(name),
        }
        .map_err(container_err)?;
        let shape = dataset.shape();
        // the library converts integer and float columns alike on read
        let data = dataset.read_raw::<f64>().map_err(container_err)?;
        NumericArray::new(data, shape)
    }
}

fn container_err(err: ::hdf5::Error) -> ClientError {
    ClientError::Container {
        what: err.to_string(),
    }
}
