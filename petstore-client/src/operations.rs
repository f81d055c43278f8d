use petstore_core::{Args, BinaryPayload, Operation};
use petstore_model::{Order, Pet, PetStatus, User};
use serde_json::Value;

use crate::{ApiClient, ClientError};

/// One method per API operation
impl ApiClient {
    pub async fn update_pet(&self, pet: &Pet) -> Result<Value, ClientError> {
        let body = serde_json::to_value(pet)?;
        self.call(Operation::UpdatePet, Args::new().body(body)).await
    }

    pub async fn add_pet(&self, pet: &Pet) -> Result<Value, ClientError> {
        let body = serde_json::to_value(pet)?;
        self.call(Operation::AddPet, Args::new().body(body)).await
    }

    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<Value, ClientError> {
        self.call(Operation::GetPetById, Args::new().param("petId", pet_id))
            .await
    }

    pub async fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Value, ClientError> {
        let args = Args::new()
            .param("petId", pet_id)
            .query_opt("name", name)
            .query_opt("status", status);
        self.call(Operation::UpdatePetWithForm, args).await
    }

    pub async fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<Value, ClientError> {
        let args = Args::new()
            .param("petId", pet_id)
            .header_opt("api_key", api_key);
        self.call(Operation::DeletePet, args).await
    }

    /// Sends `body` as raw bytes. It has to be file-like in the client's execution context.
    pub async fn upload_file(
        &self,
        pet_id: i64,
        body: BinaryPayload,
        additional_metadata: Option<&str>,
    ) -> Result<Value, ClientError> {
        let args = Args::new()
            .param("petId", pet_id)
            .query_opt("additionalMetadata", additional_metadata)
            .body(body);
        self.call(Operation::UploadFile, args).await
    }

    /// Without a status the API is asked for available pets
    pub async fn find_pets_by_status(&self, status: Option<PetStatus>) -> Result<Value, ClientError> {
        let status = status.map(serde_json::to_value).transpose()?;
        self.call(
            Operation::FindPetsByStatus,
            Args::new().query_opt("status", status),
        )
        .await
    }

    /// An empty tag list sends no `tags` parameter at all
    pub async fn find_pets_by_tags(&self, tags: &[&str]) -> Result<Value, ClientError> {
        let mut args = Args::new();
        if !tags.is_empty() {
            args = args.query("tags", tags.to_vec());
        }
        self.call(Operation::FindPetsByTags, args).await
    }

    pub async fn get_inventory(&self) -> Result<Value, ClientError> {
        self.call(Operation::GetInventory, Args::new()).await
    }

    pub async fn place_order(&self, order: &Order) -> Result<Value, ClientError> {
        let body = serde_json::to_value(order)?;
        self.call(Operation::PlaceOrder, Args::new().body(body)).await
    }

    pub async fn get_order_by_id(&self, order_id: i64) -> Result<Value, ClientError> {
        self.call(Operation::GetOrderById, Args::new().param("orderId", order_id))
            .await
    }

    pub async fn delete_order(&self, order_id: i64) -> Result<Value, ClientError> {
        self.call(Operation::DeleteOrder, Args::new().param("orderId", order_id))
            .await
    }

    pub async fn create_user(&self, user: &User) -> Result<Value, ClientError> {
        let body = serde_json::to_value(user)?;
        self.call(Operation::CreateUser, Args::new().body(body)).await
    }

    pub async fn get_user_by_name(&self, username: &str) -> Result<Value, ClientError> {
        self.call(Operation::GetUserByName, Args::new().param("username", username))
            .await
    }

    pub async fn update_user(&self, username: &str, user: &User) -> Result<Value, ClientError> {
        let body = serde_json::to_value(user)?;
        let args = Args::new().param("username", username).body(body);
        self.call(Operation::UpdateUser, args).await
    }

    pub async fn delete_user(&self, username: &str) -> Result<Value, ClientError> {
        self.call(Operation::DeleteUser, Args::new().param("username", username))
            .await
    }

    pub async fn create_users_with_list_input(&self, users: &[User]) -> Result<Value, ClientError> {
        let body = serde_json::to_value(users)?;
        self.call(Operation::CreateUsersWithListInput, Args::new().body(body))
            .await
    }

    pub async fn login_user(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Value, ClientError> {
        let args = Args::new()
            .query_opt("username", username)
            .query_opt("password", password);
        self.call(Operation::LoginUser, args).await
    }

    pub async fn logout_user(&self) -> Result<Value, ClientError> {
        self.call(Operation::LogoutUser, Args::new()).await
    }
}
