//! Client records

use chrono::{DateTime, Utc};
use rand::Rng;

use super::names;
use crate::models::{Address, Client, ClientKind, ClientMetadata};

pub fn generate_address<R: Rng + ?Sized>(rng: &mut R) -> Address {
    let (city, state) = names::CITIES[rng.random_range(0..names::CITIES.len())];
    Address {
        street: names::pick(rng, names::STREETS).to_string(),
        number: rng.random_range(1..=9999).to_string(),
        complement: rng
            .random_bool(0.5)
            .then(|| format!("Apto. {}", rng.random_range(1..=300))),
        neighborhood: names::pick(rng, names::NEIGHBORHOODS).to_string(),
        city: city.to_string(),
        state: state.to_string(),
        postal_code: names::replace_symbols(rng, "#####-###"),
        country: "Brasil".to_string(),
    }
}

pub fn generate_client<R: Rng + ?Sized>(rng: &mut R, id: u64, now: DateTime<Utc>) -> Client {
    let is_company = rng.random_bool(0.3);
    let (name, kind, document) = if is_company {
        (
            names::company_name(rng),
            ClientKind::Company,
            names::replace_symbols(rng, "##.###.###/####-##"),
        )
    } else {
        let (first, last) = names::person_name(rng);
        (
            format!("{} {}", first, last),
            ClientKind::Individual,
            names::replace_symbols(rng, "###.###.###-##"),
        )
    };

    let created_at = names::past(rng, now, 3 * 365);
    let updated_at = names::between(rng, created_at, now);
    let folders_count = rng.random_range(1..=20);
    let active_folders_count = rng.random_range(0..=folders_count);

    let first_word = name.split(' ').next().unwrap_or("user");
    let provider = if is_company { "empresa.com.br" } else { "gmail.com" };
    let email = format!("{}@{}", names::slugify(first_word), provider);

    let metadata = ClientMetadata {
        kind,
        birthday: (!is_company).then(|| {
            let years = rng.random_range(18..=80);
            names::past(rng, now - chrono::Duration::days(years * 365), 365)
        }),
        contact_person: is_company.then(|| {
            let (first, last) = names::person_name(rng);
            format!("{} {}", first, last)
        }),
        notes: rng.random_bool(0.3).then(|| names::sentence(rng)),
    };

    Client {
        id,
        name,
        document,
        email: Some(email),
        phone: Some(names::phone(rng)),
        address: Some(generate_address(rng)),
        folders_count,
        active_folders_count,
        metadata,
        created_at,
        updated_at,
    }
}

/// Well-known individual and company clients
pub fn fixtures<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Client> {
    let mut individual = generate_client(rng, 1, now);
    individual.name = "João Silva".to_string();
    individual.document = "123.456.789-00".to_string();
    individual.email = Some("joao.silva@gmail.com".to_string());
    individual.metadata = ClientMetadata {
        kind: ClientKind::Individual,
        // 1980-05-15T00:00:00Z
        birthday: DateTime::from_timestamp(327_196_800, 0),
        contact_person: None,
        notes: Some("Cliente preferencial".to_string()),
    };

    let mut company = generate_client(rng, 2, now);
    company.name = "Empresa ABC Ltda".to_string();
    company.document = "12.345.678/0001-90".to_string();
    company.email = Some("contato@empresaabc.com.br".to_string());
    company.metadata = ClientMetadata {
        kind: ClientKind::Company,
        birthday: None,
        contact_person: Some("Maria Santos".to_string()),
        notes: Some("Contrato de assessoria mensal".to_string()),
    };

    vec![individual, company]
}

/// Fixtures first, then generated clients up to `count`
pub fn generate_clients<R: Rng + ?Sized>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<Client> {
    let mut clients = fixtures(rng, now);
    let mut next_id = clients.len() as u64 + 1;
    while clients.len() < count {
        clients.push(generate_client(rng, next_id, now));
        next_id += 1;
    }
    clients
}
