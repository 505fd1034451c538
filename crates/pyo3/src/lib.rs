use pyo3::prelude::*;

use flagcache_common::python::exposure::PyExposureCache;
use flagcache_core::python::lru::PyLruCache;

#[pymodule]
fn flagcache_pyo3(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLruCache>()?;
    m.add_class::<PyExposureCache>()?;
    Ok(())
}
