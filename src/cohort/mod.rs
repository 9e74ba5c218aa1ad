use std::path::{Path, PathBuf};

const COHORT_NAMES: [&str; 10] = [
    "one_client",
    "two_clients",
    "three_clients",
    "four_clients",
    "five_clients",
    "six_clients",
    "seven_clients",
    "eight_clients",
    "nine_clients",
    "ten_clients",
];

/// Port of the i-th peer (1-based): `55001`, `55002`, ...
pub fn peer_port(index: usize) -> String {
    format!("55{:03}", index)
}

pub fn cohort_dir_name(size: usize) -> String {
    match size {
        1..=10 => COHORT_NAMES[size - 1].to_string(),
        _ => format!("{}_clients", size),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cohort {
    pub size: usize,
}

impl Cohort {
    pub fn new(size: usize) -> Cohort {
        Cohort { size }
    }

    pub fn dir_name(&self) -> String {
        cohort_dir_name(self.size)
    }

    pub fn log_files(&self, root: &Path) -> Vec<PathBuf> {
        let directory = root.join(self.dir_name());

        (1..=self.size)
            .map(|index| directory.join(format!("{}_client.log", peer_port(index))))
            .collect()
    }
}
