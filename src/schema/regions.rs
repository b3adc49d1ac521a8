// src/schema/regions.rs

use std::{fmt, str::FromStr};

use crate::error::DownloadError;

/// Czech administrative regions (kraje) as published by the police data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Pha,
    Stc,
    Jhc,
    Plk,
    Ulk,
    Hkk,
    Jhm,
    Msk,
    Olk,
    Zlk,
    Vys,
    Pak,
    Lbk,
    Kvk,
}

impl Region {
    /// All regions, in the order used when no explicit list is requested.
    pub const ALL: [Region; 14] = [
        Region::Pha,
        Region::Stc,
        Region::Jhc,
        Region::Plk,
        Region::Ulk,
        Region::Hkk,
        Region::Jhm,
        Region::Msk,
        Region::Olk,
        Region::Zlk,
        Region::Vys,
        Region::Pak,
        Region::Lbk,
        Region::Kvk,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Pha => "PHA",
            Region::Stc => "STC",
            Region::Jhc => "JHC",
            Region::Plk => "PLK",
            Region::Ulk => "ULK",
            Region::Hkk => "HKK",
            Region::Jhm => "JHM",
            Region::Msk => "MSK",
            Region::Olk => "OLK",
            Region::Zlk => "ZLK",
            Region::Vys => "VYS",
            Region::Pak => "PAK",
            Region::Lbk => "LBK",
            Region::Kvk => "KVK",
        }
    }

    /// Two-digit code naming the region's file inside an archive.
    /// The gaps (08..=13) are how upstream numbers them.
    pub fn numeric(&self) -> &'static str {
        match self {
            Region::Pha => "00",
            Region::Stc => "01",
            Region::Jhc => "02",
            Region::Plk => "03",
            Region::Ulk => "04",
            Region::Hkk => "05",
            Region::Jhm => "06",
            Region::Msk => "07",
            Region::Olk => "14",
            Region::Zlk => "15",
            Region::Vys => "16",
            Region::Pak => "17",
            Region::Lbk => "18",
            Region::Kvk => "19",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::Pha => "Hlavní město Praha",
            Region::Stc => "Středočeský kraj",
            Region::Jhc => "Jihočeský kraj",
            Region::Plk => "Plzeňský kraj",
            Region::Ulk => "Ústecký kraj",
            Region::Hkk => "Královéhradecký kraj",
            Region::Jhm => "Jihomoravský kraj",
            Region::Msk => "Moravskoslezský kraj",
            Region::Olk => "Olomoucký kraj",
            Region::Zlk => "Zlínský kraj",
            Region::Vys => "Kraj Vysočina",
            Region::Pak => "Pardubický kraj",
            Region::Lbk => "Liberecký kraj",
            Region::Kvk => "Karlovarský kraj",
        }
    }

    pub fn csv_member(&self) -> String {
        format!("{}.csv", self.numeric())
    }

    /// Parse every code, or report all the bad ones at once.
    pub fn parse_list<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Region>, DownloadError> {
        let mut regions = Vec::with_capacity(codes.len());
        let mut invalid = Vec::new();
        for code in codes {
            match code.as_ref().parse::<Region>() {
                Ok(r) => regions.push(r),
                Err(_) => invalid.push(code.as_ref().to_string()),
            }
        }
        if invalid.is_empty() {
            Ok(regions)
        } else {
            Err(DownloadError::InvalidRegions(invalid))
        }
    }
}

impl FromStr for Region {
    type Err = DownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.code() == s)
            .ok_or_else(|| DownloadError::InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
