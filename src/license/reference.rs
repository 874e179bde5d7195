use std::collections::HashSet;

use crate::config::LicensesConfig;
use crate::models::LicenseClass;

/// Labels whose freedom can't be decided without reading the package's own
/// license text.
pub const AMBIGUOUS_LICENSES: &[&str] = &[
    "custom",
    "other",
    "unknown",
    // CCPL needs a sublicense (see /usr/share/licenses/common/CCPL/*); some are non-free
    "CCPL",
    "CCPL:cc-by-sa-3.0",
];

pub const FREE_LICENSES: &[&str] = &[
    "AGPL",
    "AGPL3",
    "APACHE",
    "Apache",
    "Apache 2.0",
    "apache",
    "Artistic",
    "Artistic2.0",
    "boost",
    "BSD",
    "bsd",
    "BSD3",
    "CCPL:by-sa",
    "CCPL:cc-by-sa",
    "CDDL",
    "CPL",
    "CUSTOM",
    "EPL",
    "EPL/1.1",
    "FDL",
    "FDL1.2",
    "GPL",
    "GPL-3",
    "GPL2",
    "GPL3",
    "GPL3+GPLv2",
    "GPLv2",
    "GPLv3",
    "ISC",
    "LGPL",
    "LGPL2",
    "LGPL2.1",
    "LGPL3",
    "MIT",
    "MPL",
    "Modified BSD",
    "OFL-1.1",
    "PHP",
    "PSF",
    "perl",
    "PerlArtistic",
    "PerlArtistic2",
    "Public Domain",
    "Python",
    "RUBY",
    "W3C",
    "ZLIB",
    "zlib",
    "ZPL",
    "custom: Arphic Public_License",
    "custom: BSD",
    "custom: ISC",
    "custom: MIT",
    "custom: QPL-1.0",
    "custom:\"IBM Public Licence\"",
    "custom:\"font embedding exception\"",
    "custom:\"icu\"",
    "custom:\"pil\"",
    "custom:\"sip\"",
    "custom:Arphic Public License",
    "custom:Arphic_Public_License",
    "custom:Artistic",
    "custom:Artistic 2.0",
    "custom:Artistic-2.0",
    "custom:BSD",
    "custom:BSD-style",
    "custom:BSD3",
    "custom:Boost",
    "custom:CCBYSA",
    "custom:CCBYSA3.0",
    "custom:CCPL:by-sa",
    "custom:CeCILL",
    "custom:Creative Commons, Attribution 3.0 Unported",
    "custom:EPL",
    "custom:Expat",
    "custom:FFSL",
    "custom:FIPL",
    "custom:GPL",
    "custom:GPL/BSD",
    "custom:GPL+FE",
    "custom:INN",
    "custom:ISC",
    "custom:JasPer2.0",
    "custom:LGPL",
    "custom:LGPL2",
    "custom:MIT",
    "custom:MIT/X",
    "custom:MITX11",
    "custom:MPLv2",
    "custom:MirOS",
    "custom:NoCopyright",
    "custom:OASIS",
    "custom:OFL",
    "custom:OPEN DATA LICENSE",
    "custom:OSGPL",
    "custom:PUEL",
    "custom:PYTHON",
    "custom:PostgreSQL",
    "custom:Public Domain",
    "custom:Public_Domain",
    "custom:QPL",
    "custom:Sendmail",
    "custom:TRADEMARKS",
    "custom:Ubuntu Font Licence 1.0",
    "custom:University of Illinois/NCSA Open Source License",
    "custom:WTFPL",
    "custom:X11",
    "custom:XFREE86",
    "custom:Xiph",
    "custom:ZLIB",
    "custom:artistic",
    "custom:cc-by-sa-2.5",
    "custom:dumb",
    "custom:etpan",
    "custom:ex",
    "custom:icu",
    "custom:isc-dhcp",
    "custom:nfsidmap",
    "custom:none",
    "custom:public domain",
    "custom:publicdomain",
    "custom:qwt",
    "custom:scite",
    "custom:scowl",
    "custom:unknown",
    "custom:usermin",
    "custom:vim",
    "custom:voidspace",
    "custom:webmin",
    "custom:wxWindows",
    "custom:zlib",
    "custom:zlib/libpng",
];

/// The curated free and ambiguous label sets a scan classifies against.
///
/// Built once at startup and never mutated afterwards. Labels match
/// byte-for-byte: `"GPL"` and `"gpl"` are different labels.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSets {
    free: HashSet<String>,
    ambiguous: HashSet<String>,
}

impl ReferenceSets {
    pub fn new<F, A>(free: F, ambiguous: A) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            free: free.into_iter().map(Into::into).collect(),
            ambiguous: ambiguous.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in curated tables.
    pub fn builtin() -> Self {
        Self::new(FREE_LICENSES.iter().copied(), AMBIGUOUS_LICENSES.iter().copied())
    }

    /// Builtin tables extended with the config's labels, or replaced by them
    /// when `extend_builtin` is off.
    pub fn from_config(config: &LicensesConfig) -> Self {
        let mut sets = if config.extend_builtin {
            Self::builtin()
        } else {
            Self::default()
        };
        sets.free.extend(config.free.iter().cloned());
        sets.ambiguous.extend(config.ambiguous.iter().cloned());
        sets
    }

    /// Free wins over ambiguous; anything in neither set is non-free.
    pub fn classify(&self, label: &str) -> LicenseClass {
        if self.free.contains(label) {
            LicenseClass::Free
        } else if self.ambiguous.contains(label) {
            LicenseClass::Ambiguous
        } else {
            LicenseClass::NonFree
        }
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn ambiguous_count(&self) -> usize {
        self.ambiguous.len()
    }
}
