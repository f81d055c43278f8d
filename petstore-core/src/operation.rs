use std::{fmt::Display, str::FromStr};

use http::Method;

use crate::template::PathTemplate;

/// The operations offered by the pet-store API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    UpdatePet,
    AddPet,
    GetPetById,
    UpdatePetWithForm,
    DeletePet,
    UploadFile,
    FindPetsByStatus,
    FindPetsByTags,
    GetInventory,
    PlaceOrder,
    GetOrderById,
    DeleteOrder,
    CreateUser,
    GetUserByName,
    UpdateUser,
    DeleteUser,
    CreateUsersWithListInput,
    LoginUser,
    LogoutUser,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub const ALL: [Operation; 19] = [
        Operation::UpdatePet,
        Operation::AddPet,
        Operation::GetPetById,
        Operation::UpdatePetWithForm,
        Operation::DeletePet,
        Operation::UploadFile,
        Operation::FindPetsByStatus,
        Operation::FindPetsByTags,
        Operation::GetInventory,
        Operation::PlaceOrder,
        Operation::GetOrderById,
        Operation::DeleteOrder,
        Operation::CreateUser,
        Operation::GetUserByName,
        Operation::UpdateUser,
        Operation::DeleteUser,
        Operation::CreateUsersWithListInput,
        Operation::LoginUser,
        Operation::LogoutUser,
    ];

    pub fn method(&self) -> Method {
        use Operation::*;
        match self {
            GetPetById | FindPetsByStatus | FindPetsByTags | GetInventory | GetOrderById
            | GetUserByName | LoginUser | LogoutUser => Method::GET,
            AddPet | UpdatePetWithForm | UploadFile | PlaceOrder | CreateUser
            | CreateUsersWithListInput => Method::POST,
            UpdatePet | UpdateUser => Method::PUT,
            DeletePet | DeleteOrder | DeleteUser => Method::DELETE,
        }
    }

    pub fn path(&self) -> PathTemplate {
        use Operation::*;
        let template = match self {
            UpdatePet | AddPet => "/pet",
            GetPetById | UpdatePetWithForm | DeletePet => "/pet/:petId",
            UploadFile => "/pet/:petId/uploadImage",
            FindPetsByStatus => "/pet/findByStatus",
            FindPetsByTags => "/pet/findByTags",
            GetInventory => "/store/inventory",
            PlaceOrder => "/store/order",
            GetOrderById | DeleteOrder => "/store/order/:orderId",
            CreateUser => "/user",
            GetUserByName | UpdateUser | DeleteUser => "/user/:username",
            CreateUsersWithListInput => "/user/createWithList",
            LoginUser => "/user/login",
            LogoutUser => "/user/logout",
        };
        PathTemplate::new(template)
    }

    /// the operation id the API documents for this operation
    pub fn alias(&self) -> &'static str {
        use Operation::*;
        match self {
            UpdatePet => "updatePet",
            AddPet => "addPet",
            GetPetById => "getPetById",
            UpdatePetWithForm => "updatePetWithForm",
            DeletePet => "deletePet",
            UploadFile => "uploadFile",
            FindPetsByStatus => "findPetsByStatus",
            FindPetsByTags => "findPetsByTags",
            GetInventory => "getInventory",
            PlaceOrder => "placeOrder",
            GetOrderById => "getOrderById",
            DeleteOrder => "deleteOrder",
            CreateUser => "createUser",
            GetUserByName => "getUserByName",
            UpdateUser => "updateUser",
            DeleteUser => "deleteUser",
            CreateUsersWithListInput => "createUsersWithListInput",
            LoginUser => "loginUser",
            LogoutUser => "logoutUser",
        }
    }

    /// textual key like `get /pet/:petId`
    pub fn key(&self) -> String {
        format!(
            "{} {}",
            self.method().as_str().to_lowercase(),
            self.path().as_str()
        )
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// Parses either a key (`get /pet/:petId`) or an alias (`getPetById`)
impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Operation::ALL
            .iter()
            .find(|op| op.alias() == s || op.key().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = Operation::ALL.iter().map(Operation::key).collect();
        assert_eq!(keys.len(), 19);
        let aliases: HashSet<&str> = Operation::ALL.iter().map(Operation::alias).collect();
        assert_eq!(aliases.len(), 19);
    }

    #[test]
    fn test_key() {
        assert_eq!(Operation::GetPetById.key(), "get /pet/:petId");
        assert_eq!(
            Operation::UploadFile.to_string(),
            "post /pet/:petId/uploadImage"
        );
        assert_eq!(Operation::DeleteUser.method(), Method::DELETE);
    }

    #[test]
    fn test_parse() {
        for op in Operation::ALL {
            assert_eq!(op.key().parse::<Operation>().unwrap(), op);
            assert_eq!(op.alias().parse::<Operation>().unwrap(), op);
        }
        assert_eq!(
            "patch /pet".parse::<Operation>(),
            Err(UnknownOperation("patch /pet".to_string()))
        );
    }
}
