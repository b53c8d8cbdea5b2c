use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/blog", blog_routes())
        .nest("/contact", contact_routes())
        .nest("/search", search_routes())
        .nest("/images", image_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::blog::list_posts,
            handlers::blog::create_post
        ))
        .routes(routes!(handlers::blog::list_all_posts))
        .routes(routes!(handlers::blog::preview_post))
        .routes(routes!(handlers::blog::get_post_by_slug))
        .routes(routes!(
            handlers::blog::get_post,
            handlers::blog::update_post,
            handlers::blog::delete_post
        ))
}

fn contact_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::contact::submit_contact,
            handlers::contact::list_contacts
        ))
        .routes(routes!(handlers::contact::mark_contact_read))
}

fn search_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::search::search))
}

fn image_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::images::upload_image))
        .layer(handlers::images::upload_body_limit())
}
