pub(crate) mod wave;
