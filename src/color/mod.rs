pub(crate) mod palette;
pub(crate) mod raster;
pub(crate) mod sampler;
