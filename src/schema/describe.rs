// src/schema/describe.rs

/// Human-readable meaning of the accident fields, as published with the data.
/// The free-form columns a..t (apart from the GPS pair) are lumped together.
pub const COLUMN_DESCRIPTIONS: &[(&str, &str)] = &[
    ("p1", "IDENTIFIKAČNÍ ČÍSLO"),
    ("p36", "DRUH POZEMNÍ KOMUNIKACE"),
    ("p37", "ČÍSLO POZEMNÍ KOMUNIKACE"),
    ("p2a", "DATUM"),
    ("weekday(p2a)", "DEN V TÝDNU"),
    ("p2b", "ČAS"),
    ("p6", "DRUH NEHODY"),
    ("p7", "DRUH SRÁŽKY JEDOUCÍCH VOZIDEL"),
    ("p8", "DRUH PEVNÉ PŘEKÁŽKY"),
    ("p9", "CHARAKTER NEHODY"),
    ("p10", "ZAVINĚNÍ NEHODY"),
    ("p11", "ALKOHOL U VINÍKA NEHODY PŘÍTOMEN"),
    ("p12", "HLAVNÍ PŘÍČINY NEHODY"),
    ("p13a", "USMRCENO OSOB"),
    ("p13b", "TĚŽCE ZRANĚNO OSOB"),
    ("p13c", "LEHCE ZRANĚNO OSOB"),
    ("p14", "CELKOVÁ HMOTNÁ ŠKODA"),
    ("p15", "DRUH POVRCHU VOZOVKY"),
    ("p16", "STAV POVRCHU VOZOVKY V DOBĚ NEHODY"),
    ("p17", "STAV KOMUNIKACE"),
    ("p18", "POVĚTRNOSTNÍ PODMÍNKY V DOBĚ NEHODY"),
    ("p19", "VIDITELNOST"),
    ("p20", "ROZHLEDOVÉ POMĚRY"),
    ("p21", "DĚLENÍ KOMUNIKACE"),
    ("p22", "SITUOVÁNÍ NEHODY NA KOMUNIKACI"),
    ("p23", "ŘÍZENÍ PROVOZU V DOBĚ NEHODY"),
    ("p24", "MÍSTNÍ ÚPRAVA PŘEDNOSTI V JÍZDĚ"),
    ("p27", "SPECIFICKÁ MÍSTA A OBJEKTY V MÍSTĚ NEHODY"),
    ("p28", "SMĚROVÉ POMĚRY"),
    ("p34", "POČET ZÚČASTNĚNÝCH VOZIDEL"),
    ("p35", "MÍSTO DOPRAVNÍ NEHODY"),
    ("p39", "DRUH KŘIŽUJÍCÍ KOMUNIKACE"),
    ("p44", "DRUH VOZIDLA"),
    ("p45a", "VÝROBNÍ ZNAČKA MOTOROVÉHO VOZIDLA"),
    ("p47", "ROK VÝROBY VOZIDLA"),
    ("p48a", "CHARAKTERISTIKA VOZIDLA"),
    ("p49", "SMYK"),
    ("p50a", "VOZIDLO PO NEHODĚ"),
    ("p50b", "ÚNIK PROVOZNÍCH, PŘEPRAVOVANÝCH HMOT"),
    ("p51", "ZPŮSOB VYPROŠTĚNÍ OSOB Z VOZIDLA"),
    ("p52", "SMĚR JÍZDY NEBO POSTAVENÍ VOZIDLA"),
    ("p53", "ŠKODA NA VOZIDLE"),
    ("p55a", "KATEGORIE ŘIDIČE"),
    ("p57", "STAV ŘIDIČE"),
    ("p58", "VNĚJŠÍ OVLIVNĚNÍ ŘIDIČE"),
    ("p5a", "LOKALITA NEHODY"),
    ("d", "GPS souřadnice X"),
    ("e", "GPS souřadnice Y"),
    (
        "a, b, f, g, h, i, j, k, l, n, o, p, q, r, s, t",
        "DALŠÍ INFORMACE",
    ),
];

/// One `name\t - description` line per entry.
pub fn columns_info() -> String {
    COLUMN_DESCRIPTIONS
        .iter()
        .map(|(name, desc)| format!("{name}\t - {desc}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column_index;

    #[test]
    fn every_described_single_column_exists() {
        for (name, _) in COLUMN_DESCRIPTIONS.iter().filter(|(n, _)| !n.contains(',')) {
            assert!(column_index(name).is_some(), "{name} is not a schema column");
        }
        assert!(columns_info().starts_with("p1\t - IDENTIFIKAČNÍ ČÍSLO\n"));
    }
}
