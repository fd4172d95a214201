//! Brazilian Portuguese word pools and small text helpers

use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Ana", "Beatriz", "Bruno", "Camila", "Carlos", "Daniela", "Eduardo", "Fernanda", "Gabriel",
    "Helena", "Igor", "Juliana", "João", "Larissa", "Lucas", "Marcelo", "Maria", "Mariana",
    "Mateus", "Natália", "Otávio", "Paula", "Pedro", "Rafael", "Renata", "Rodrigo", "Sofia",
    "Thiago", "Vanessa", "Vinícius",
];

pub const LAST_NAMES: &[&str] = &[
    "Almeida", "Araújo", "Barbosa", "Cardoso", "Carvalho", "Costa", "Dias", "Ferreira", "Gomes",
    "Lima", "Martins", "Melo", "Moreira", "Nascimento", "Oliveira", "Pereira", "Ribeiro",
    "Rocha", "Rodrigues", "Santos", "Silva", "Soares", "Souza", "Teixeira",
];

const COMPANY_SUFFIXES: &[&str] = &["Ltda.", "S.A.", "e Associados", "Comércio Ltda.", "EIRELI"];

const COMPANY_STEMS: &[&str] = &[
    "Agropecuária", "Construtora", "Distribuidora", "Indústria", "Logística", "Metalúrgica",
    "Tecnologia", "Transportes", "Alimentos", "Serviços",
];

pub const STREETS: &[&str] = &[
    "Rua Augusta", "Avenida Paulista", "Rua da Consolação", "Rua Oscar Freire",
    "Avenida Brigadeiro Faria Lima", "Rua Haddock Lobo", "Alameda Santos", "Rua Vergueiro",
];

pub const NEIGHBORHOODS: &[&str] = &[
    "Bela Vista", "Centro", "Jardins", "Moema", "Pinheiros", "Vila Mariana", "Itaim Bibi",
    "Perdizes",
];

/// (city, state)
pub const CITIES: &[(&str, &str)] = &[
    ("São Paulo", "SP"),
    ("Rio de Janeiro", "RJ"),
    ("Belo Horizonte", "MG"),
    ("Curitiba", "PR"),
    ("Porto Alegre", "RS"),
    ("Salvador", "BA"),
    ("Recife", "PE"),
    ("Brasília", "DF"),
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
    "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
];

/// Random element of a non-empty pool
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> (String, String) {
    (
        pick(rng, FIRST_NAMES).to_string(),
        pick(rng, LAST_NAMES).to_string(),
    )
}

pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, COMPANY_STEMS),
        pick(rng, LAST_NAMES),
        pick(rng, COMPANY_SUFFIXES)
    )
}

/// Lowercase ASCII slug: accents stripped, spaces become `-`
pub fn slugify(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| {
            let c = fold_accent(c).to_ascii_lowercase();
            match c {
                'a'..='z' | '0'..='9' | '.' | '-' | '_' => Some(c),
                ' ' => Some('-'),
                _ => None,
            }
        })
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'ê' | 'è' => 'e',
        'É' | 'Ê' | 'È' => 'E',
        'í' | 'ì' | 'î' => 'i',
        'Í' | 'Ì' | 'Î' => 'I',
        'ó' | 'ô' | 'õ' | 'ò' => 'o',
        'Ó' | 'Ô' | 'Õ' | 'Ò' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        other => other,
    }
}

/// Replace each `#` with a random digit
pub fn replace_symbols<R: Rng + ?Sized>(rng: &mut R, pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '#' => char::from(b'0' + rng.random_range(0..10u8)),
            other => other,
        })
        .collect()
}

pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    replace_symbols(rng, "(11) 9####-####")
}

pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(5..=10);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, LOREM)).collect();
    let mut text = words.join(" ");
    if let Some(first) = text.get(0..1) {
        text.replace_range(0..1, &first.to_uppercase());
    }
    text.push('.');
    text
}

pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(3..=5);
    (0..len).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// GitHub-hosted avatar image
pub fn avatar_url<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "https://avatars.githubusercontent.com/u/{}",
        rng.random_range(1..100_000u32)
    )
}

/// Instant at millisecond precision, so it survives an ISO round trip
pub fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Random instant in `[from, to]`
pub fn between<R: Rng + ?Sized>(rng: &mut R, from: DateTime<Utc>, to: DateTime<Utc>) -> DateTime<Utc> {
    let span = (to - from).num_milliseconds();
    if span <= 0 {
        return truncate_millis(from);
    }
    truncate_millis(from + Duration::milliseconds(rng.random_range(0..=span)))
}

/// Random instant within the `days` before `now`
pub fn past<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    between(rng, now - Duration::days(days), now)
}

/// Random instant within the `days` after `now`
pub fn future<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    between(rng, now, now + Duration::days(days))
}
