//! Inter-atom spacing rules
//!
//! TeX inserts glue between adjacent atoms based only on their classes and
//! on whether the ambient style is tight (script or scriptscript). The
//! tables below encode the TeXbook chapter 18 rules; combinations that are
//! missing get no glue.

use phf::{Map, phf_map};
use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::style::Style;

/// A number with a TeX unit, e.g. `3mu` or `-0.5em`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<T>
where
    T: AsRef<str>,
{
    /// Numeric value of the measurement
    pub number: f64,
    /// Unit of measurement (e.g., "mu", "em", "ex")
    pub unit: T,
}

/// Measurement with a unit parsed at runtime.
pub type MeasurementOwned = Measurement<String>;

/// Measurement with a compile-time unit.
pub type MeasurementStatic = Measurement<&'static str>;

/// `\,`, 3mu.
pub const THINSPACE: MeasurementStatic = MeasurementStatic {
    number: 3.0,
    unit: "mu",
};

/// `\:`, 4mu.
pub const MEDIUMSPACE: MeasurementStatic = MeasurementStatic {
    number: 4.0,
    unit: "mu",
};

/// `\;`, 5mu.
pub const THICKSPACE: MeasurementStatic = MeasurementStatic {
    number: 5.0,
    unit: "mu",
};

/// Atom classes as they appear on built boxes.
///
/// The `m`-prefixed name is the class attached to the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AtomClass {
    /// Ordinary: letters, digits, groups, fractions
    Mord,
    /// Large operator such as `\sum` or `\sin`
    Mop,
    /// Binary operator
    Mbin,
    /// Relation
    Mrel,
    /// Opening delimiter
    Mopen,
    /// Closing delimiter
    Mclose,
    /// Punctuation
    Mpunct,
    /// Inner formula such as `\left(..\right)`
    Minner,
}

/// Left class to right class to glue.
pub type Spacings = Map<&'static str, Map<&'static str, MeasurementStatic>>;

/// Glue in display and text styles.
///
/// | Left \ Right | ord   | op    | bin | rel   | open  | close | punct | inner |
/// |--------------|-------|-------|-----|-------|-------|-------|-------|-------|
/// | ord          | -     | thin  | med | thick | -     | -     | -     | thin  |
/// | op           | thin  | thin  | -   | thick | -     | -     | -     | thin  |
/// | bin          | med   | med   | -   | -     | med   | -     | -     | med   |
/// | rel          | thick | thick | -   | -     | thick | -     | -     | thick |
/// | open         | -     | -     | -   | -     | -     | -     | -     | -     |
/// | close        | -     | thin  | med | thick | -     | -     | -     | thin  |
/// | punct        | thin  | thin  | -   | thick | thin  | thin  | thin  | thin  |
/// | inner        | thin  | thin  | med | thick | thin  | -     | thin  | thin  |
pub const SPACINGS: Spacings = phf_map! {
    "mord" => phf_map! {
        "mop" => THINSPACE,
        "mbin" => MEDIUMSPACE,
        "mrel" => THICKSPACE,
        "minner" => THINSPACE,
    },
    "mop" => phf_map! {
        "mord" => THINSPACE,
        "mop" => THINSPACE,
        "mrel" => THICKSPACE,
        "minner" => THINSPACE,
    },
    "mbin" => phf_map! {
        "mord" => MEDIUMSPACE,
        "mop" => MEDIUMSPACE,
        "mopen" => MEDIUMSPACE,
        "minner" => MEDIUMSPACE,
    },
    "mrel" => phf_map! {
        "mord" => THICKSPACE,
        "mop" => THICKSPACE,
        "mopen" => THICKSPACE,
        "minner" => THICKSPACE,
    },
    "mopen" => phf_map!{},
    "mclose" => phf_map! {
        "mop" => THINSPACE,
        "mbin" => MEDIUMSPACE,
        "mrel" => THICKSPACE,
        "minner" => THINSPACE,
    },
    "mpunct" => phf_map! {
        "mord" => THINSPACE,
        "mop" => THINSPACE,
        "mrel" => THICKSPACE,
        "mopen" => THINSPACE,
        "mclose" => THINSPACE,
        "mpunct" => THINSPACE,
        "minner" => THINSPACE,
    },
    "minner" => phf_map! {
        "mord" => THINSPACE,
        "mop" => THINSPACE,
        "mbin" => MEDIUMSPACE,
        "mrel" => THICKSPACE,
        "mopen" => THINSPACE,
        "mpunct" => THINSPACE,
        "minner" => THINSPACE,
    },
};

/// Glue in script and scriptscript styles: only thin spaces around
/// operators survive.
pub const TIGHT_SPACINGS: Spacings = phf_map! {
    "mord" => phf_map! {
        "mop" => THINSPACE,
    },
    "mop" => phf_map! {
        "mord" => THINSPACE,
        "mop" => THINSPACE,
    },
    "mbin" => phf_map!{},
    "mrel" => phf_map!{},
    "mopen" => phf_map!{},
    "mclose" => phf_map! {
        "mop" => THINSPACE,
    },
    "mpunct" => phf_map!{},
    "minner" => phf_map! {
        "mop" => THINSPACE,
    },
};

/// Glue to insert between a `left` atom and a `right` atom in `style`, or
/// `None` when TeX inserts nothing.
#[must_use]
pub fn spacing(
    left: AtomClass,
    right: AtomClass,
    style: Style,
) -> Option<&'static MeasurementStatic> {
    let table = if style.is_tight() {
        &TIGHT_SPACINGS
    } else {
        &SPACINGS
    };
    table.get(left.as_ref())?.get(right.as_ref())
}
