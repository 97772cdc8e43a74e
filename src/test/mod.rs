pub(crate) mod collection;
pub(crate) mod multilinestring;
pub(crate) mod multipolygon;
