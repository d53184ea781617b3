//! Shared fixtures for directory integration tests.

#![allow(dead_code)]

use iata_directory::{encode_blob, Airport, AirportKind, Directory};

pub fn airport(
    code: &str,
    name: &str,
    municipality: &str,
    kind: AirportKind,
    zone: &str,
) -> Airport {
    Airport {
        code: code.into(),
        ident: format!("X{}", code),
        name: name.into(),
        kind,
        municipality: municipality.into(),
        time_zone: zone.into(),
        ..Airport::default()
    }
}

pub fn fixture_airports() -> Vec<Airport> {
    vec![
        Airport {
            code: "BUD".into(),
            ident: "LHBP".into(),
            name: "Budapest Liszt Ferenc International Airport".into(),
            kind: AirportKind::LargeAirport,
            continent: "EU".into(),
            country: "HU".into(),
            region: "HU-BU".into(),
            municipality: "Budapest".into(),
            gps_code: "LHBP".into(),
            home: "http://www.bud.hu/english".into(),
            wikipedia: "https://en.wikipedia.org/wiki/Budapest_Ferenc_Liszt_International_Airport"
                .into(),
            time_zone: "Europe/Budapest".into(),
            lat: 47.43018,
            lon: 19.262393,
            ..Airport::default()
        },
        airport("VIE", "Vienna International Airport", "Vienna", AirportKind::LargeAirport, "Europe/Vienna"),
        airport("SZG", "Salzburg Airport W. A. Mozart", "Salzburg", AirportKind::MediumAirport, "Europe/Vienna"),
        airport("ZRH", "Zürich Airport", "Zürich", AirportKind::LargeAirport, "Europe/Zurich"),
        airport("GRU", "Guarulhos - Governador André Franco Montoro International Airport", "São Paulo/Guarulhos", AirportKind::LargeAirport, "America/Sao_Paulo"),
        airport("KRK", "John Paul II International Airport Kraków-Balice", "Kraków", AirportKind::LargeAirport, "Europe/Warsaw"),
        airport("TSR", "Timișoara Traian Vuia Airport", "Timișoara", AirportKind::MediumAirport, "Europe/Bucharest"),
        airport("XHP", "Some Heliport", "Some-City", AirportKind::Heliport, "Europe/Paris"),
        airport("QQQ", "Nowhere Strip", "Nowhere", AirportKind::SmallAirport, "Nowhere/Unknown"),
    ]
}

pub fn fixture_directory() -> Directory {
    Directory::from_bytes(encode_blob(&fixture_airports()).unwrap()).unwrap()
}
