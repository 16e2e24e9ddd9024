mod tle;
