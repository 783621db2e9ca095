//! Static gazetteer and naming authority tables.
//!
//! Both tables are fixed at compile time and never mutated.

use super::Jurisdiction;

/// Date stamped on the gazetteer resources
pub const GAZETTEER_MODIFIED: &str = "2019-06-06T12:18:00";

/// A contributing gazetteer and its external catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gazetteer {
    pub jurisdiction: Jurisdiction,
    pub label: &'static str,
    pub catalogue: &'static str,
}

/// The body responsible for naming places in a jurisdiction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingAuthority {
    pub jurisdiction: Jurisdiction,
    pub label: &'static str,
    pub web: &'static str,
}

pub static GAZETTEERS: [Gazetteer; 10] = [
    Gazetteer {
        jurisdiction: Jurisdiction::Aad,
        label: "Australian Antarctic Place Names Gazetteer",
        catalogue: "https://data.aad.gov.au/aadc/gaz/",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Act,
        label: "Australian Capital Territory Place Names Gazetteer",
        catalogue: "http://app.actmapi.act.gov.au/actmapi/index.html?viewer=pn",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Aho,
        label: "Australian Hydrographic Office Place Names Gazetteer",
        catalogue: "http://www.hydro.gov.au/",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Nsw,
        label: "New South Wales Place Names Gazetteer",
        catalogue: "http://www.gnb.nsw.gov.au/place_naming/placename_search",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Nt,
        label: "Northern Territory Place Names Gazetteer",
        catalogue: "https://www.ntlis.nt.gov.au/placenames/",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Qld,
        label: "Queensland Place Names Gazetteer",
        catalogue: "https://www.dnrm.qld.gov.au/qld/environment/land/place-names/search",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Sa,
        label: "South Australian Place Names Gazetteer",
        catalogue: "https://www.sa.gov.au/topics/planning-and-property/planning-and-land-management/suburb-road-and-place-names/place-names-search",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Tas,
        label: "Tasmanian Place Names Gazetteer",
        catalogue: "https://www.placenames.tas.gov.au/#p0",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Vic,
        label: "Victorian Place Names Gazetteer",
        catalogue: "https://maps.land.vic.gov.au/lassi/VicnamesUI.jsp",
    },
    Gazetteer {
        jurisdiction: Jurisdiction::Wa,
        label: "Western Australian Place Names Gazetteer",
        catalogue: "https://www0.landgate.wa.gov.au/maps-and-imagery/wa-geographic-names",
    },
];

pub static NAMING_AUTHORITIES: [NamingAuthority; 10] = [
    NamingAuthority {
        jurisdiction: Jurisdiction::Aad,
        label: "Australian Antarctic Division",
        web: "https://www.antarctica.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Act,
        label: "Australian Capital Territory",
        web: "https://www.planning.act.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Aho,
        label: "Australian Hydrographic Office",
        web: "http://www.hydro.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Nsw,
        label: "Geographical Names Board of New South Wales",
        web: "https://www.gnb.nsw.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Nt,
        label: "Northern Territory Place Names Committee",
        web: "https://www.ntlis.nt.gov.au/placenames/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Qld,
        label: "Queensland Government",
        web: "https://www.qld.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Sa,
        label: "South Australian Government",
        web: "https://www.sa.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Tas,
        label: "Nomenclature Board of Tasmania",
        web: "https://www.placenames.tas.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Vic,
        label: "Geographic Names Victoria",
        web: "https://www.land.vic.gov.au/",
    },
    NamingAuthority {
        jurisdiction: Jurisdiction::Wa,
        label: "Western Australian Government",
        web: "https://www0.landgate.wa.gov.au/",
    },
];

impl Gazetteer {
    /// Look up by jurisdiction code, e.g. "WA"
    pub fn lookup(code: &str) -> Option<&'static Gazetteer> {
        GAZETTEERS.iter().find(|g| g.jurisdiction.code() == code)
    }

    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> Option<&'static Gazetteer> {
        GAZETTEERS.iter().find(|g| g.jurisdiction == jurisdiction)
    }

    pub fn code(&self) -> &'static str {
        self.jurisdiction.code()
    }
}

impl NamingAuthority {
    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> Option<&'static NamingAuthority> {
        NAMING_AUTHORITIES
            .iter()
            .find(|a| a.jurisdiction == jurisdiction)
    }
}
