//! Word tables for English, Hindi (Devanagari) and romanized Hindi.

use chrono::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Next,
    This,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Maps Devanagari digits to ASCII so "१५" reads as "15".
pub fn ascii_digit(c: char) -> char {
    match c {
        '०'..='९' => char::from_digit(c as u32 - '०' as u32, 10).unwrap_or(c),
        _ => c,
    }
}

pub fn month(word: &str) -> Option<u32> {
    let m = match word {
        "january" | "jan" | "janvari" | "janwari" | "जनवरी" => 1,
        "february" | "feb" | "farvari" | "farwari" | "फरवरी" | "फ़रवरी" => 2,
        "march" | "mar" | "maarch" | "मार्च" => 3,
        "april" | "apr" | "aprail" | "अप्रैल" | "अप्रेल" => 4,
        "may" | "mai" | "मई" => 5,
        "june" | "jun" | "joon" | "जून" => 6,
        "july" | "jul" | "julai" | "जुलाई" => 7,
        "august" | "aug" | "agast" | "अगस्त" => 8,
        "september" | "sep" | "sept" | "sitambar" | "सितंबर" | "सितम्बर" => 9,
        "october" | "oct" | "aktubar" | "aktoobar" | "अक्टूबर" | "अक्तूबर" => 10,
        "november" | "nov" | "navambar" | "नवंबर" | "नवम्बर" => 11,
        "december" | "dec" | "disambar" | "दिसंबर" | "दिसम्बर" => 12,
        _ => return None,
    };
    Some(m)
}

pub fn weekday(word: &str) -> Option<Weekday> {
    let wd = match word {
        "monday" | "mon" | "somvar" | "somwar" | "सोमवार" => Weekday::Mon,
        "tuesday" | "tue" | "tues" | "mangalvar" | "mangalwar" | "मंगलवार" => Weekday::Tue,
        "wednesday" | "wed" | "budhvar" | "budhwar" | "बुधवार" => Weekday::Wed,
        "thursday" | "thu" | "thurs" | "guruvar" | "guruwar" | "brihaspativar" | "गुरुवार"
        | "बृहस्पतिवार" => Weekday::Thu,
        "friday" | "fri" | "shukravar" | "shukrawar" | "शुक्रवार" => Weekday::Fri,
        "saturday" | "sat" | "shanivar" | "shaniwar" | "शनिवार" => Weekday::Sat,
        "sunday" | "sun" | "ravivar" | "raviwar" | "itvaar" | "itwar" | "रविवार" | "इतवार" => {
            Weekday::Sun
        }
        _ => return None,
    };
    Some(wd)
}

/// Whole-phrase relative days. "kal" is both yesterday and tomorrow in
/// Hindi; it resolves forward since stays are booked ahead.
pub fn relative_day(phrase: &str) -> Option<i64> {
    let offset = match phrase {
        "today" | "tonight" | "aaj" | "aj" | "आज" => 0,
        "tomorrow" | "tmrw" | "kal" | "कल" => 1,
        "day after tomorrow" | "parso" | "parson" | "परसों" | "परसो" => 2,
        "narso" | "narson" | "नरसों" => 3,
        "yesterday" => -1,
        "day before yesterday" => -2,
        _ => return None,
    };
    Some(offset)
}

pub fn modifier(word: &str) -> Option<Modifier> {
    match word {
        "next" | "coming" | "upcoming" | "agle" | "agla" | "agli" | "अगले" | "अगला" | "अगली" => {
            Some(Modifier::Next)
        }
        "this" | "is" | "iss" | "इस" => Some(Modifier::This),
        "last" | "previous" | "pichhle" | "pichle" | "pichhla" | "पिछले" | "पिछला" => {
            Some(Modifier::Last)
        }
        _ => None,
    }
}

pub fn unit(word: &str) -> Option<Unit> {
    match word {
        "day" | "days" | "din" | "दिन" => Some(Unit::Day),
        "week" | "weeks" | "hafte" | "hafta" | "haftey" | "हफ्ते" | "हफ़्ते" | "हफ्ता" | "सप्ताह" => {
            Some(Unit::Week)
        }
        "month" | "months" | "mahine" | "mahina" | "महीने" | "महीना" => Some(Unit::Month),
        "year" | "years" | "saal" | "sal" | "साल" | "वर्ष" => Some(Unit::Year),
        _ => None,
    }
}

/// Words trailing an offset: "3 days later", "3 din baad", "2 weeks ago".
pub fn direction(word: &str) -> Option<Direction> {
    match word {
        "later" | "after" | "hence" | "baad" | "bad" | "बाद" => Some(Direction::Forward),
        "ago" | "before" | "earlier" | "pehle" | "pahle" | "पहले" => Some(Direction::Backward),
        _ => None,
    }
}

pub fn number(word: &str) -> Option<u32> {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        return word.parse().ok();
    }
    let n = match word {
        "a" | "an" | "one" | "ek" | "एक" => 1,
        "two" | "do" | "दो" => 2,
        "three" | "teen" | "तीन" => 3,
        "four" | "char" | "chaar" | "चार" => 4,
        "five" | "paanch" | "panch" | "पांच" | "पाँच" => 5,
        "six" | "chhe" | "chah" | "छह" | "छः" => 6,
        "seven" | "saat" | "सात" => 7,
        "eight" | "aath" | "आठ" => 8,
        "nine" | "nau" | "नौ" => 9,
        "ten" | "das" | "दस" => 10,
        _ => return None,
    };
    Some(n)
}

/// Connective words that carry no date information.
pub fn is_filler(word: &str) -> bool {
    matches!(
        word,
        "on" | "the"
            | "of"
            | "at"
            | "for"
            | "date"
            | "ko"
            | "ki"
            | "ka"
            | "se"
            | "tak"
            | "tareekh"
            | "tarikh"
            | "को"
            | "की"
            | "का"
            | "से"
            | "तक"
            | "तारीख"
            | "तारीख़"
    )
}
