mod batch;
mod geodetic;
