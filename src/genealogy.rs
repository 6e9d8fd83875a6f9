use std::{cmp::Ordering, path::Path};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Error;

const NAMES: [&str; 5] = [
    "Иванов Иван",
    "Петров Петр",
    "Сидоров Сидор",
    "Кузнецова Анна",
    "Морозова Мария",
];

/// A person from a family tree, as sorted by the benchmark.
///
/// Ordering (and therefore equality) looks at birth year, then full name,
/// then number of children. The death year is carried along but never
/// compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenealogyPerson {
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "BirthYear")]
    pub birth_year: i32,
    #[serde(rename = "DeathYear")]
    pub death_year: i32,
    #[serde(rename = "ChildrenCount")]
    pub children_count: u32,
}

impl GenealogyPerson {
    pub fn random<R: Rng>(rng: &mut R) -> GenealogyPerson {
        let birth_year = 1800 + rng.gen_range(0..221);
        GenealogyPerson {
            full_name: NAMES[rng.gen_range(0..NAMES.len())].to_string(),
            birth_year,
            death_year: birth_year + 30 + rng.gen_range(0..60),
            children_count: rng.gen_range(0..10),
        }
    }

    pub fn sort_key(&self) -> (i32, &str, u32) {
        (self.birth_year, self.full_name.as_str(), self.children_count)
    }
}

impl PartialEq for GenealogyPerson {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for GenealogyPerson {}

impl PartialOrd for GenealogyPerson {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GenealogyPerson {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

pub fn generate_people<R: Rng>(size: usize, rng: &mut R) -> Vec<GenealogyPerson> {
    (0..size).map(|_| GenealogyPerson::random(rng)).collect()
}

/// Writes `people` with a `FullName,BirthYear,DeathYear,ChildrenCount` header,
/// replacing `path` if it exists.
pub fn write_people_csv(people: &[GenealogyPerson], path: &Path) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for person in people {
        writer.serialize(person)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn random_people_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(1);
    for person in generate_people(500, &mut rng) {
        assert!(NAMES.contains(&person.full_name.as_str()));
        assert!((1800..=2020).contains(&person.birth_year));
        let age = person.death_year - person.birth_year;
        assert!((30..90).contains(&age));
        assert!(person.children_count < 10);
    }
}

#[test]
fn ordering_ignores_death_year() {
    let a = GenealogyPerson {
        full_name: "Петров Петр".to_string(),
        birth_year: 1900,
        death_year: 1950,
        children_count: 2,
    };
    let b = GenealogyPerson {
        death_year: 1990,
        ..a.clone()
    };
    assert_eq!(a, b);

    let younger = GenealogyPerson {
        birth_year: 1901,
        ..a.clone()
    };
    assert!(a < younger);

    let by_name = GenealogyPerson {
        full_name: "Иванов Иван".to_string(),
        ..a.clone()
    };
    assert!(by_name < a);

    let more_children = GenealogyPerson {
        children_count: 3,
        ..a.clone()
    };
    assert!(a < more_children);
}

#[test]
fn people_csv_has_expected_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let mut rng = StdRng::seed_from_u64(3);
    let mut people = generate_people(20, &mut rng);
    people.sort();

    write_people_csv(&people, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, ["FullName", "BirthYear", "DeathYear", "ChildrenCount"]);
    let read_back: Vec<GenealogyPerson> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(read_back.len(), 20);
    assert!(read_back.windows(2).all(|w| w[0] <= w[1]));
}
