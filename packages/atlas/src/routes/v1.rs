use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers::{
    algorithm, application_area, computing_resource_type, concrete_solution, file,
    implementation, implementation_package, provider, publication,
};
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let max_blob_size = config.storage.max_blob_size;

    OpenApiRouter::new()
        .nest(
            "/patterns/{pattern_id}/concrete-solutions",
            pattern_concrete_solution_routes(max_blob_size),
        )
        .nest("/concrete-solutions", concrete_solution_routes())
        .nest("/algorithms", algorithm_routes())
        .nest("/implementations", implementation_routes(max_blob_size))
        .nest("/publications", publication_routes())
        .nest("/application-areas", application_area_routes())
        .nest(
            "/computing-resource-types",
            computing_resource_type_routes(),
        )
        .nest("/providers", provider_routes())
}

fn pattern_concrete_solution_routes(max_blob_size: u64) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            concrete_solution::create_concrete_solution,
            concrete_solution::list_pattern_concrete_solutions
        ))
        .routes(routes!(
            concrete_solution::get_concrete_solution,
            concrete_solution::update_concrete_solution,
            concrete_solution::delete_concrete_solution
        ))
        .routes(routes!(concrete_solution::download_concrete_solution_file));

    let upload = OpenApiRouter::new()
        .routes(routes!(
            concrete_solution::upload_concrete_solution_file,
            concrete_solution::get_concrete_solution_file,
            concrete_solution::delete_concrete_solution_file
        ))
        .layer(file::upload_body_limit(max_blob_size));

    crud.merge(upload)
}

fn concrete_solution_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(concrete_solution::list_concrete_solutions))
}

fn algorithm_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            algorithm::create_algorithm,
            algorithm::list_algorithms
        ))
        .routes(routes!(
            algorithm::get_algorithm,
            algorithm::update_algorithm,
            algorithm::delete_algorithm
        ))
        .routes(routes!(
            algorithm::list_algorithm_publications,
            algorithm::link_algorithm_publication
        ))
        .routes(routes!(algorithm::unlink_algorithm_publication))
        .routes(routes!(
            algorithm::list_algorithm_application_areas,
            algorithm::link_algorithm_application_area
        ))
        .routes(routes!(algorithm::unlink_algorithm_application_area))
        .routes(routes!(
            implementation::create_implementation,
            implementation::list_algorithm_implementations
        ))
        .routes(routes!(
            implementation::get_implementation,
            implementation::update_implementation,
            implementation::delete_implementation
        ))
}

fn implementation_routes(max_blob_size: u64) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(implementation::list_implementations))
        .routes(routes!(
            implementation::list_implementation_publications,
            implementation::link_implementation_publication
        ))
        .routes(routes!(implementation::unlink_implementation_publication))
        .nest(
            "/{implementation_id}/implementation-packages",
            implementation_package_routes(max_blob_size),
        )
}

fn implementation_package_routes(max_blob_size: u64) -> OpenApiRouter<AppState> {
    let crud = OpenApiRouter::new()
        .routes(routes!(
            implementation_package::create_implementation_package,
            implementation_package::list_implementation_packages
        ))
        .routes(routes!(
            implementation_package::get_implementation_package,
            implementation_package::delete_implementation_package
        ))
        .routes(routes!(
            implementation_package::download_implementation_package_file
        ));

    let upload = OpenApiRouter::new()
        .routes(routes!(
            implementation_package::upload_implementation_package_file,
            implementation_package::get_implementation_package_file,
            implementation_package::delete_implementation_package_file
        ))
        .layer(file::upload_body_limit(max_blob_size));

    crud.merge(upload)
}

fn publication_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            publication::create_publication,
            publication::list_publications
        ))
        .routes(routes!(
            publication::get_publication,
            publication::update_publication,
            publication::delete_publication
        ))
        .routes(routes!(publication::list_publication_algorithms))
        .routes(routes!(publication::list_publication_implementations))
}

fn application_area_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            application_area::create_application_area,
            application_area::list_application_areas
        ))
        .routes(routes!(
            application_area::get_application_area,
            application_area::update_application_area,
            application_area::delete_application_area
        ))
}

fn computing_resource_type_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            computing_resource_type::create_computing_resource_type,
            computing_resource_type::list_computing_resource_types
        ))
        .routes(routes!(
            computing_resource_type::get_computing_resource_type,
            computing_resource_type::update_computing_resource_type,
            computing_resource_type::delete_computing_resource_type
        ))
}

fn provider_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(provider::create_provider, provider::list_providers))
        .routes(routes!(
            provider::get_provider,
            provider::update_provider,
            provider::delete_provider
        ))
        .routes(routes!(provider::create_qpu, provider::list_qpus))
        .routes(routes!(provider::get_qpu, provider::delete_qpu))
}
