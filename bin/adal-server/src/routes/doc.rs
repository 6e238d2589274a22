use crate::routes::{api, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "adal-server",
    description = "Adal AI assistant API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(api::api_docs());
    root
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn docs_cover_every_route() {
        let docs = get_docs();
        assert!(docs.paths.paths.contains_key("/health"));
        assert!(docs.paths.paths.contains_key("/api/claude"));
    }
}
