use api_types::{
    ErrorResponse, Resource, category::Category, expense::Expense, income::Income, user::User,
};
use reqwest::{RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::error::{AppError, Result};

/// Outcome of a failed request, by HTTP status.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("server: {0}")]
    Server(String),
    #[error("transport: {0}")]
    Transport(#[source] reqwest::Error),
}

/// REST client for the finance API.
///
/// Every entity is a collection under the base URL (see
/// [`api_types::paths`]) with the same list/create/update/delete verbs, so
/// the generic methods carry the HTTP work and the per-entity methods only
/// pin the type.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl Client {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token,
        })
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn list<T>(&self) -> std::result::Result<Vec<T>, ClientError>
    where
        T: Resource + DeserializeOwned,
    {
        let endpoint = self.endpoint(T::PATH)?;
        let res = self
            .authorize(self.http.get(endpoint))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let records = json_or_error::<Vec<T>>(res).await?;
        tracing::debug!("listed {} {}", records.len(), T::NAME);
        Ok(records)
    }

    pub async fn get<T>(&self, id: i64) -> std::result::Result<T, ClientError>
    where
        T: Resource + DeserializeOwned,
    {
        let endpoint = self.endpoint(&format!("{}/{id}", T::PATH))?;
        let res = self
            .authorize(self.http.get(endpoint))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        json_or_error(res).await
    }

    pub async fn create<T>(&self, record: &T) -> std::result::Result<T, ClientError>
    where
        T: Resource + Serialize + DeserializeOwned,
    {
        let endpoint = self.endpoint(T::PATH)?;
        let res = self
            .authorize(self.http.post(endpoint))
            .json(record)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        json_or_error(res).await
    }

    pub async fn update<T>(&self, id: i64, record: &T) -> std::result::Result<T, ClientError>
    where
        T: Resource + Serialize + DeserializeOwned,
    {
        let endpoint = self.endpoint(&format!("{}/{id}", T::PATH))?;
        let res = self
            .authorize(self.http.put(endpoint))
            .json(record)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        json_or_error(res).await
    }

    pub async fn delete<T>(&self, id: i64) -> std::result::Result<(), ClientError>
    where
        T: Resource,
    {
        let endpoint = self.endpoint(&format!("{}/{id}", T::PATH))?;
        let res = self
            .authorize(self.http.delete(endpoint))
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            tracing::info!("deleted {} {id}", T::NAME);
            return Ok(());
        }
        Err(error_from(res).await)
    }

    pub async fn expenses_list(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        self.list::<Expense>().await
    }

    pub async fn expense_delete(&self, id: i64) -> std::result::Result<(), ClientError> {
        self.delete::<Expense>(id).await
    }

    pub async fn incomes_list(&self) -> std::result::Result<Vec<Income>, ClientError> {
        self.list::<Income>().await
    }

    pub async fn categories_list(&self) -> std::result::Result<Vec<Category>, ClientError> {
        self.list::<Category>().await
    }

    pub async fn users_list(&self) -> std::result::Result<Vec<User>, ClientError> {
        self.list::<User>().await
    }
}

async fn json_or_error<T: DeserializeOwned>(res: Response) -> std::result::Result<T, ClientError> {
    if res.status().is_success() {
        return res.json::<T>().await.map_err(ClientError::Transport);
    }
    Err(error_from(res).await)
}

async fn error_from(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden,
        404 => ClientError::NotFound,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
    };
    use serde_json::{Value, json};

    use super::*;

    const TOKEN: &str = "header.payload.signature";

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {TOKEN}"))
    }

    async fn list_expenses(headers: HeaderMap) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
        }
        (
            StatusCode::OK,
            Json(json!([
                {"id": 1, "valor": 100.0, "dataPagamento": "2024-01-10", "descricao": "rent"},
                {"id": 2, "valor": null, "dataVencimento": "2024-02-01T10:00:00"},
                {"id": 3, "valor": 5.0, "dataPagamento": "01/02/2024"}
            ])),
        )
    }

    async fn echo(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let mut body = body;
        body["id"] = json!(42);
        (StatusCode::CREATED, Json(body))
    }

    async fn echo_with_id(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
        let mut body = body;
        body["id"] = json!(id);
        Json(body)
    }

    async fn one_expense(Path(id): Path<i64>) -> Json<Value> {
        Json(json!({"id": id, "valor": 80.0, "dataPagamento": "2024-04-02T00:00:00Z"}))
    }

    async fn remove(
        Path(id): Path<i64>,
    ) -> std::result::Result<StatusCode, (StatusCode, Json<Value>)> {
        if id == 1 {
            return Ok(StatusCode::NO_CONTENT);
        }
        Err((StatusCode::CONFLICT, Json(json!({"error": "expense in use"}))))
    }

    fn router() -> Router {
        Router::new()
            .route("/expenses", get(list_expenses).post(echo))
            .route(
                "/expenses/{id}",
                get(one_expense).put(echo_with_id).delete(remove),
            )
            .route(
                "/categories",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/users",
                get(|| async {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({"error": "bad filter"})),
                    )
                }),
            )
    }

    #[tokio::test]
    async fn lists_expenses_with_bearer_token() {
        let base = serve(router()).await;
        let client = Client::new(&base, Some(TOKEN.to_string())).unwrap();

        let expenses = client.expenses_list().await.unwrap();

        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[0].value_minor, Some(10_000));
        assert_eq!(expenses[1].value_minor, None);
        assert_eq!(expenses[0].description.as_deref(), Some("rent"));
        assert_eq!(
            expenses[1].due_date.as_ref().map(ToString::to_string).as_deref(),
            Some("2024-02-01")
        );
        assert_eq!(
            expenses[2].payment_date.as_ref().map(ToString::to_string).as_deref(),
            Some("01/02/2024")
        );
    }

    #[tokio::test]
    async fn fetches_one_expense_for_editing() {
        let base = serve(router()).await;
        let client = Client::new(&base, Some(TOKEN.to_string())).unwrap();

        let expense = client.get::<Expense>(5).await.unwrap();

        assert_eq!(expense.id, 5);
        assert_eq!(expense.value_minor, Some(8_000));
        assert_eq!(
            expense.payment_date.map(|d| d.to_string()).as_deref(),
            Some("2024-04-02")
        );
    }

    #[tokio::test]
    async fn missing_token_maps_to_unauthorized() {
        let base = serve(router()).await;
        let client = Client::new(&base, None).unwrap();

        let err = client.expenses_list().await.unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn delete_reports_success_and_conflict() {
        let base = serve(router()).await;
        let client = Client::new(&base, Some(TOKEN.to_string())).unwrap();

        client.expense_delete(1).await.unwrap();
        let err = client.expense_delete(2).await.unwrap_err();

        match err {
            ClientError::Conflict(message) => assert_eq!(message, "expense in use"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn create_and_update_round_trip_through_the_api() {
        let base = serve(router()).await;
        let client = Client::new(&base, Some(TOKEN.to_string())).unwrap();
        let draft = Expense {
            id: 0,
            value_minor: Some(2_550),
            description: Some("internet".to_string()),
            ..Expense::default()
        };

        let created = client.create(&draft).await.unwrap();
        let updated = client.update(7, &created).await.unwrap();

        assert_eq!(created.id, 42);
        assert_eq!(created.value_minor, Some(2_550));
        assert_eq!(updated.id, 7);
        assert_eq!(updated.description.as_deref(), Some("internet"));
    }

    #[tokio::test]
    async fn error_statuses_map_to_client_errors() {
        let base = serve(router()).await;
        let client = Client::new(&base, None).unwrap();

        let categories = client.categories_list().await.unwrap_err();
        let users = client.users_list().await.unwrap_err();
        let incomes = client.incomes_list().await.unwrap_err();

        match categories {
            ClientError::Server(message) => assert_eq!(message, "unknown error"),
            other => panic!("unexpected error: {other}"),
        }
        match users {
            ClientError::Validation(message) => assert_eq!(message, "bad filter"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(incomes, ClientError::NotFound));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::new(&format!("http://{addr}"), None).unwrap();

        let err = client.get::<Expense>(1).await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn base_url_keeps_its_path_prefix() {
        let client = Client::new("http://localhost:8080/api", None).unwrap();

        let url = client.endpoint("expenses/3").unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/api/expenses/3");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            Client::new("not a url", None),
            Err(AppError::BaseUrl(_))
        ));
    }

    #[test]
    fn errors_describe_themselves() {
        assert_eq!(ClientError::NotFound.to_string(), "not found");
        assert_eq!(
            ClientError::Conflict("expense in use".to_string()).to_string(),
            "conflict: expense in use"
        );
    }
}
