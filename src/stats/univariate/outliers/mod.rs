//! Classification of outliers
//!
//! WARNING: There's no formal/mathematical definition of what an outlier actually is. Therefore,
//! all outlier classifiers are *subjective*. The one provided here measures distances in robust
//! standard deviations, which keeps the fences themselves insensitive to the outliers.

pub mod mad;
