use actix_web::middleware::{from_fn, Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use log::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use task_api::config::Config;
use task_api::db::TaskStore;
use task_api::middleware::authentication;
use task_api::routes::{
    create_task, delete_all_tasks, delete_task, get_task, hello, list_tasks, login, update_task,
    ApiDoc,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    let store = TaskStore::open(&config.database_uri).map_err(|err| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("failed to open store at {}: {err}", config.database_uri),
        )
    })?;

    let store = web::Data::new(store);
    let config = web::Data::new(config);

    info!("Starting task API on http://127.0.0.1:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(config.clone())
            .wrap(from_fn(authentication))
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .service(hello)
            .service(login)
            .service(list_tasks)
            .service(create_task)
            .service(get_task)
            .service(update_task)
            .service(delete_task)
            .service(delete_all_tasks)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
