//! The fixed catalog of birthday wish templates.
//!
//! The input form offers these as checkboxes; a draft carries the selected
//! 0-based indices. Indices are stable: new templates may only be appended.

/// Every wish template, in the order the form lists them.
pub const WISHES: [&str; 15] = [
    "May your birthday be filled with endless joy, laughter, and beautiful moments that create cherished memories.",
    "Wishing you a year ahead filled with amazing opportunities, incredible adventures, and all your dreams coming true.",
    "On your special day, may you be surrounded by love, happiness, and all the wonderful people who care about you.",
    "Here's to celebrating another year of your amazing life! May this new chapter be your best one yet.",
    "May your birthday sparkle with joy and your year ahead shine with success and happiness.",
    "Wishing you a day filled with cake, presents, laughter, and all your favorite things in the world.",
    "Another year older, another year wiser, and another year more wonderful! Happy birthday to an amazing person.",
    "May this birthday mark the beginning of a year filled with good health, great fortune, and endless possibilities.",
    "On your birthday, I wish you all the happiness your heart can hold and all the success life can bring.",
    "Here's to celebrating you today and always! May your birthday be as special as you are to everyone around you.",
    "Wishing you a birthday that's just as wonderful, unique, and amazing as you are. Enjoy every moment!",
    "May your special day be filled with sweet surprises, heartfelt wishes, and beautiful moments with loved ones.",
    "Another year of incredible experiences awaits you! May your birthday be the perfect start to your best year yet.",
    "Sending you warm birthday wishes filled with love, joy, and all the magical moments that make life beautiful.",
    "May your birthday celebration be filled with laughter, your year ahead with adventure, and your heart with happiness.",
];

/// Look up a wish by index.
pub fn wish(index: usize) -> Option<&'static str> {
    WISHES.get(index).copied()
}

/// Normalize a selection: keep first-seen order, drop repeats.
///
/// Range checking is the caller's job (see [`crate::record::InputDraft::validate`]).
pub fn dedup_selection(selection: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(selection.len());
    for &index in selection {
        if !out.contains(&index) {
            out.push(index);
        }
    }
    out
}
