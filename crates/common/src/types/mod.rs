use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Call contract between the gateway and the record store service.
///
/// Each operation is a JSON `POST` to its path; request and reply bodies are
/// the structs below.
pub mod rpc {
    use serde::{Deserialize, Serialize};

    pub const CREATE_USER_PATH: &str = "/rpc/UserService/CreateUser";
    pub const GET_USER_PATH: &str = "/rpc/UserService/GetUser";

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct CreateUserRequest {
        pub id: String,
        pub name: String,
        pub email: String,
    }

    /// `success == false` is the duplicate-id outcome, not a failure.
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct CreateUserResponse {
        pub success: bool,
        pub message: String,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    pub struct GetUserRequest {
        pub id: String,
    }

    /// `id`, `name` and `email` are empty unless `found`.
    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
    pub struct GetUserResponse {
        #[serde(default)]
        pub id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub email: String,
        pub found: bool,
    }
}
