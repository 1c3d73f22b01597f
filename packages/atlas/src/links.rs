//! Hypermedia link assembly.
//!
//! Every function is pure: it takes a stored model plus the API base URL
//! (`AppConfig::api_base`) and returns the `_links` object for the response.

use uuid::Uuid;

use crate::entity::{
    algorithm, application_area, computing_resource_type, concrete_solution, implementation,
    implementation_package, provider, publication, qpu,
};
use crate::models::shared::{Link, Links};
use crate::repository::Page;

fn links<const N: usize>(entries: [(&str, String); N]) -> Links {
    entries
        .into_iter()
        .map(|(rel, href)| (rel.to_string(), Link { href }))
        .collect()
}

pub fn pattern_concrete_solutions_href(base: &str, pattern: Uuid) -> String {
    format!("{base}/patterns/{pattern}/concrete-solutions")
}

pub fn concrete_solution_href(base: &str, model: &concrete_solution::Model) -> String {
    format!(
        "{}/{}",
        pattern_concrete_solutions_href(base, model.pattern),
        model.id
    )
}

pub fn algorithm_href(base: &str, id: Uuid) -> String {
    format!("{base}/algorithms/{id}")
}

pub fn implementation_href(base: &str, algorithm_id: Uuid, id: Uuid) -> String {
    format!("{}/implementations/{id}", algorithm_href(base, algorithm_id))
}

pub fn implementation_packages_href(base: &str, implementation_id: Uuid) -> String {
    format!("{base}/implementations/{implementation_id}/implementation-packages")
}

pub fn implementation_package_href(base: &str, implementation_id: Uuid, id: Uuid) -> String {
    format!(
        "{}/{id}",
        implementation_packages_href(base, implementation_id)
    )
}

pub fn publication_href(base: &str, id: Uuid) -> String {
    format!("{base}/publications/{id}")
}

pub fn provider_href(base: &str, id: Uuid) -> String {
    format!("{base}/providers/{id}")
}

pub fn concrete_solution(model: &concrete_solution::Model, base: &str) -> Links {
    let href = concrete_solution_href(base, model);
    let mut out = links([
        (
            "pattern-concrete-solutions",
            pattern_concrete_solutions_href(base, model.pattern),
        ),
        ("self", href.clone()),
    ]);
    if model.file_id.is_some() {
        out.extend(links([("file", format!("{href}/file"))]));
    }
    out
}

/// Links of a file resource, addressed through its owner.
pub fn file(owner_href: &str) -> Links {
    links([
        ("content", format!("{owner_href}/file/content")),
        ("owner", owner_href.to_string()),
        ("self", format!("{owner_href}/file")),
    ])
}

pub fn algorithm(model: &algorithm::Model, base: &str) -> Links {
    let href = algorithm_href(base, model.id);
    links([
        ("application-areas", format!("{href}/application-areas")),
        ("implementations", format!("{href}/implementations")),
        ("publications", format!("{href}/publications")),
        ("self", href),
    ])
}

pub fn implementation(model: &implementation::Model, base: &str) -> Links {
    links([
        ("algorithm", algorithm_href(base, model.algorithm_id)),
        (
            "implementation-packages",
            implementation_packages_href(base, model.id),
        ),
        (
            "publications",
            format!("{base}/implementations/{}/publications", model.id),
        ),
        (
            "self",
            implementation_href(base, model.algorithm_id, model.id),
        ),
    ])
}

pub fn implementation_package(
    model: &implementation_package::Model,
    has_file: bool,
    base: &str,
) -> Links {
    let href = implementation_package_href(base, model.implementation_id, model.id);
    let mut out = links([
        (
            "implementation-packages",
            implementation_packages_href(base, model.implementation_id),
        ),
        ("self", href.clone()),
    ]);
    if has_file {
        out.extend(links([("file", format!("{href}/file"))]));
    }
    out
}

pub fn publication(model: &publication::Model, base: &str) -> Links {
    let href = publication_href(base, model.id);
    links([
        ("algorithms", format!("{href}/algorithms")),
        ("implementations", format!("{href}/implementations")),
        ("self", href),
    ])
}

pub fn application_area(model: &application_area::Model, base: &str) -> Links {
    links([("self", format!("{base}/application-areas/{}", model.id))])
}

pub fn computing_resource_type(model: &computing_resource_type::Model, base: &str) -> Links {
    links([(
        "self",
        format!("{base}/computing-resource-types/{}", model.id),
    )])
}

pub fn provider(model: &provider::Model, base: &str) -> Links {
    let href = provider_href(base, model.id);
    links([("qpus", format!("{href}/qpus")), ("self", href)])
}

pub fn qpu(model: &qpu::Model, base: &str) -> Links {
    let provider = provider_href(base, model.provider_id);
    links([
        ("provider", provider.clone()),
        ("self", format!("{provider}/qpus/{}", model.id)),
    ])
}

fn page_href(collection_href: &str, page: u64, size: u64) -> String {
    format!("{collection_href}?page={page}&size={size}")
}

/// `self`, `first`, `last`, plus `prev`/`next` when those pages exist.
pub fn paged<T>(collection_href: &str, page: &Page<T>) -> Links {
    let last = page.total_pages().saturating_sub(1);
    let mut out = links([
        ("first", page_href(collection_href, 0, page.size)),
        ("last", page_href(collection_href, last, page.size)),
        ("self", page_href(collection_href, page.page, page.size)),
    ]);
    if page.page > 0 {
        let prev = (page.page - 1).min(last);
        out.extend(links([("prev", page_href(collection_href, prev, page.size))]));
    }
    if page.page < last {
        out.extend(links([(
            "next",
            page_href(collection_href, page.page + 1, page.size),
        )]));
    }
    out
}
