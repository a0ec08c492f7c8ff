//! Procedural player and team names.

use rand::Rng;
use rand::seq::SliceRandom;

const FIRST_NAMES: [&str; 30] = [
    "James", "Michael", "Robert", "David", "William", "John", "Chris", "Marcus", "Anthony",
    "Daniel", "Matthew", "Joshua", "Andrew", "Joseph", "Ryan", "Brandon", "Tyler", "Kevin",
    "Brian", "Jason", "Derek", "Jordan", "Aaron", "Adam", "Zach", "Jake", "Nick", "Sam", "Ben",
    "Luke",
];

const LAST_NAMES: [&str; 30] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Wilson",
    "Moore", "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson",
    "Robinson", "Clark", "Lewis", "Lee", "Walker", "Hall", "Allen", "Young", "King", "Wright",
    "Scott", "Green",
];

const CITIES: [&str; 50] = [
    "Lincoln", "Springfield", "Riverside", "Franklin", "Clinton", "Madison", "Arlington",
    "Georgetown", "Salem", "Manchester", "Aurora", "Dover", "Lexington", "Cleveland", "Jackson",
    "Columbus", "Huntington", "Charleston", "Richmond", "Portland", "Oakland", "Phoenix", "Denver",
    "Seattle", "Austin", "Nashville", "Memphis", "Atlanta", "Miami", "Dallas", "Tulsa",
    "Birmingham", "Louisville", "Indianapolis", "Milwaukee", "Detroit", "Chicago", "Minneapolis",
    "Kansas City", "St. Louis", "New Orleans", "Tampa", "Orlando", "Charlotte", "Raleigh",
    "Pittsburgh", "Philadelphia", "Boston", "Buffalo", "Baltimore",
];

const MASCOTS: [&str; 30] = [
    "Eagles", "Tigers", "Bears", "Wolves", "Panthers", "Lions", "Hawks", "Falcons", "Cougars",
    "Wildcats", "Bulldogs", "Mustangs", "Broncos", "Ravens", "Cardinals", "Warriors", "Titans",
    "Spartans", "Vikings", "Knights", "Thunder", "Storm", "Blaze", "Crusaders", "Raiders",
    "Rangers", "Rebels", "Trojans", "Hornets", "Jaguars",
];

#[must_use]
pub fn player_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{first} {last}")
}

/// `count` distinct "City Mascot" names. Wraps with a numeric suffix once
/// every pairing is used.
#[must_use]
pub fn team_names<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let mut pairs: Vec<(usize, usize)> = (0..CITIES.len())
        .flat_map(|city| (0..MASCOTS.len()).map(move |mascot| (city, mascot)))
        .collect();
    pairs.shuffle(rng);
    (0..count)
        .map(|index| {
            let (city, mascot) = pairs[index % pairs.len()];
            let lap = index / pairs.len();
            if lap == 0 {
                format!("{} {}", CITIES[city], MASCOTS[mascot])
            } else {
                format!("{} {} {}", CITIES[city], MASCOTS[mascot], lap + 1)
            }
        })
        .collect()
}
