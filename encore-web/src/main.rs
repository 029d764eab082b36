use encore_web::{content_type, resolve, Config, ConfigError, INDEX};
use hyper::header::{HeaderValue, ALLOW, CACHE_CONTROL, CONTENT_TYPE};
use hyper::http::response::Builder;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use log::{debug, error, info};
use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

async fn handle(config: Arc<Config>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    Ok(match route(&config, req).await {
        Err(e) => {
            error!("server error: {:?}", e);
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::empty())
                .expect("empty response builder should work")
        }
        Ok(resp) => resp,
    })
}

async fn route(config: &Config, req: Request<Body>) -> Result<Response<Body>, Error> {
    debug!("{} {}", req.method(), req.uri().path());
    let head = match *req.method() {
        Method::GET => false,
        Method::HEAD => true,
        _ => {
            return Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .header(ALLOW, HeaderValue::from_static("GET, HEAD"))
                .body(Body::empty())
                .map_err(Error::from)
        }
    };
    let Some(relative) = resolve(req.uri().path()) else {
        return not_found();
    };
    let path = config.static_dir.join(relative);
    // Unknown paths fall back to the page itself.
    let path = if is_file(&path).await? {
        path
    } else {
        let index = config.static_dir.join(INDEX);
        if !is_file(&index).await? {
            return not_found();
        }
        index
    };
    let bytes = tokio::fs::read(&path).await?;
    let body = if head { Body::empty() } else { Body::from(bytes) };
    get_response_builder(&path)
        .status(StatusCode::OK)
        .body(body)
        .map_err(Error::from)
}

async fn is_file(path: &Path) -> Result<bool, Error> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::from(e)),
    }
}

fn not_found() -> Result<Response<Body>, Error> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::empty())
        .map_err(Error::from)
}

fn get_response_builder(path: &Path) -> Builder {
    let cache = if cfg!(feature = "dev") {
        "no-store"
    } else if path.ends_with(INDEX) {
        "no-cache"
    } else {
        "public, max-age=3600"
    };
    Response::builder()
        .header(CONTENT_TYPE, HeaderValue::from_static(content_type(path)))
        .header(CACHE_CONTROL, HeaderValue::from_static(cache))
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", Error::from(e));
            std::process::exit(1);
        }
    };
    if !config.static_dir.is_dir() {
        error!(
            "static directory {} does not exist",
            config.static_dir.display()
        );
        std::process::exit(1);
    }
    let addr = config.addr;
    info!(
        "serving {} on http://{}",
        config.static_dir.display(),
        addr
    );

    let config = Arc::new(config);
    let make_svc = make_service_fn(move |_conn| {
        let config = Arc::clone(&config);
        async {
            Ok::<_, Infallible>(service_fn(move |r| handle(Arc::clone(&config), r)))
        }
    });

    let server = Server::bind(&addr).serve(make_svc);

    if let Err(e) = server.await {
        error!("server error: {}", e);
    }
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
enum Error {
    RequestError(hyper::http::Error),
    IoError(io::Error),
    ConfigError(ConfigError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RequestError(e) => write!(f, "could not build response: {}", e),
            Error::IoError(e) => write!(f, "could not read file: {}", e),
            Error::ConfigError(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl From<hyper::http::Error> for Error {
    fn from(e: hyper::http::Error) -> Error {
        Error::RequestError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::IoError(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Error {
        Error::ConfigError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<div id=\"app\"></div>").unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg").join("encore_wasm_bg.wasm"), b"\0asm").unwrap();
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            static_dir: PathBuf::from(dir.path()),
        };
        (dir, config)
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body(resp: Response<Body>) -> Vec<u8> {
        hyper::body::to_bytes(resp.into_body()).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn serves_index_for_root() {
        let (_dir, config) = site();
        let resp = route(&config, get("/?access_token=abc")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        assert_eq!(body(resp).await, b"<div id=\"app\"></div>");
    }

    #[tokio::test]
    async fn serves_assets_with_their_type() {
        let (_dir, config) = site();
        let resp = route(&config, get("/pkg/encore_wasm_bg.wasm")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/wasm");
        assert_eq!(body(resp).await, b"\0asm");
    }

    #[tokio::test]
    async fn unknown_paths_fall_back_to_index() {
        let (_dir, config) = site();
        for path in ["/callback", "/pkg"] {
            let resp = route(&config, get(path)).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(resp.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
        }
    }

    #[tokio::test]
    async fn traversal_is_not_found() {
        let (_dir, config) = site();
        let resp = route(&config, get("/../Cargo.toml")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_index_is_not_found() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            static_dir: PathBuf::from(dir.path()),
        };
        let resp = route(&config, get("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn head_has_no_body() {
        let (_dir, config) = site();
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let resp = route(&config, req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body(resp).await.is_empty());
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        let (_dir, config) = site();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let resp = route(&config, req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()[ALLOW], "GET, HEAD");
    }
}
