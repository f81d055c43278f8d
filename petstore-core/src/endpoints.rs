use indexmap::IndexMap;

use crate::args::Args;
use crate::entities::{EntityName, PET_STATUS, build_entity_schemas};
use crate::error::{IssuePath, SchemaBuilderError, ValidationError};
use crate::file_like::ExecutionContext;
use crate::operation::Operation;
use crate::schema::Schema;
use crate::types::ParameterLocation;

pub const BODY: &str = "body";

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    location: ParameterLocation,
    schema: Schema,
}

impl ParamSpec {
    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// The parameters one operation accepts, by name. The request payload,
/// if any, is the parameter named `body`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointContract {
    params: IndexMap<String, ParamSpec>,
}

impl EndpointContract {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.get(name)
    }

    pub fn param_iter(&self) -> impl Iterator<Item = (&str, &ParamSpec)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn body(&self) -> Option<&Schema> {
        self.params.get(BODY).map(ParamSpec::schema)
    }

    /**
    Validates a complete argument set. Every declared parameter is looked up
    in the argument slot matching its location; defaults are filled in and
    values canonicalized. Arguments the contract does not declare are dropped.
    */
    pub fn validate_args(&self, ctx: ExecutionContext, args: &Args) -> Result<Args, ValidationError> {
        let mut issues = Vec::new();
        let mut out = Args::new();
        let mut path = IssuePath::root();

        for (name, spec) in &self.params {
            path.push_key(spec.location.as_str());
            match spec.location {
                ParameterLocation::Body => {
                    out.body = spec
                        .schema
                        .check_arg(ctx, args.body.clone(), &mut path, &mut issues);
                }
                location => {
                    path.push_key(name);
                    let value = args.slot(location).and_then(|slot| slot.get(name));
                    if let Some(v) = spec.schema.check(ctx, value, &mut path, &mut issues) {
                        if let Some(slot) = out.slot_mut(location) {
                            slot.insert(name.clone(), v);
                        }
                    }
                    path.pop();
                }
            }
            path.pop();
        }

        self.log_undeclared(args);

        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }
        Ok(out)
    }

    fn log_undeclared(&self, args: &Args) {
        for location in [
            ParameterLocation::Path,
            ParameterLocation::Query,
            ParameterLocation::Header,
        ] {
            let Some(slot) = args.slot(location) else {
                continue;
            };
            for name in slot.keys() {
                if !matches!(self.params.get(name), Some(spec) if spec.location == location) {
                    log::debug!("dropping undeclared argument {}.{name}", location.as_str());
                }
            }
        }
        if args.body.is_some() && self.body().is_none() {
            log::debug!("dropping body, operation does not take one");
        }
    }
}

#[derive(Debug, Default)]
pub struct ContractBuilder {
    params: IndexMap<String, ParamSpec>,
}

impl ContractBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(self, name: &str, schema: Schema) -> Result<Self, SchemaBuilderError> {
        self.param(name, ParameterLocation::Path, schema)
    }

    pub fn query(self, name: &str, schema: Schema) -> Result<Self, SchemaBuilderError> {
        self.param(name, ParameterLocation::Query, schema)
    }

    pub fn header(self, name: &str, schema: Schema) -> Result<Self, SchemaBuilderError> {
        self.param(name, ParameterLocation::Header, schema)
    }

    pub fn body(self, schema: Schema) -> Result<Self, SchemaBuilderError> {
        self.param(BODY, ParameterLocation::Body, schema)
    }

    fn param(
        mut self,
        name: &str,
        location: ParameterLocation,
        schema: Schema,
    ) -> Result<Self, SchemaBuilderError> {
        if self.params.contains_key(name) {
            return Err(SchemaBuilderError::DuplicateFieldName(name.to_string()));
        }
        self.params
            .insert(name.to_string(), ParamSpec { location, schema });
        Ok(self)
    }

    pub fn build(self) -> EndpointContract {
        EndpointContract {
            params: self.params,
        }
    }
}

/// The contract of every operation, in declaration order
pub fn define_endpoint_schemas() -> IndexMap<Operation, EndpointContract> {
    build_endpoint_schemas().expect("endpoint contract table must not declare a parameter twice")
}

pub(crate) fn build_endpoint_schemas()
-> Result<IndexMap<Operation, EndpointContract>, SchemaBuilderError> {
    use Operation::*;

    let entities = build_entity_schemas()?;
    let entity = |name: EntityName| entities[&name].clone();

    let mut m = IndexMap::new();
    m.insert(UpdatePet, ContractBuilder::new().body(entity(EntityName::Pet))?.build());
    m.insert(AddPet, ContractBuilder::new().body(entity(EntityName::Pet))?.build());
    m.insert(
        GetPetById,
        ContractBuilder::new().path("petId", Schema::Integer)?.build(),
    );
    m.insert(
        UpdatePetWithForm,
        ContractBuilder::new()
            .path("petId", Schema::Integer)?
            .query("name", Schema::String.optional())?
            .query("status", Schema::String.optional())?
            .build(),
    );
    m.insert(
        DeletePet,
        ContractBuilder::new()
            .header("api_key", Schema::String.optional())?
            .path("petId", Schema::Integer)?
            .build(),
    );
    m.insert(
        UploadFile,
        ContractBuilder::new()
            .body(Schema::FileLike)?
            .path("petId", Schema::Integer)?
            .query("additionalMetadata", Schema::String.optional())?
            .build(),
    );
    m.insert(
        FindPetsByStatus,
        ContractBuilder::new()
            .query("status", Schema::Enum(PET_STATUS).with_default("available"))?
            .build(),
    );
    m.insert(
        FindPetsByTags,
        ContractBuilder::new()
            .query("tags", Schema::array(Schema::String).optional())?
            .build(),
    );
    m.insert(GetInventory, ContractBuilder::new().build());
    m.insert(PlaceOrder, ContractBuilder::new().body(entity(EntityName::Order))?.build());
    m.insert(
        GetOrderById,
        ContractBuilder::new().path("orderId", Schema::Integer)?.build(),
    );
    m.insert(
        DeleteOrder,
        ContractBuilder::new().path("orderId", Schema::Integer)?.build(),
    );
    m.insert(CreateUser, ContractBuilder::new().body(entity(EntityName::User))?.build());
    m.insert(
        GetUserByName,
        ContractBuilder::new().path("username", Schema::String)?.build(),
    );
    m.insert(
        UpdateUser,
        ContractBuilder::new()
            .body(entity(EntityName::User))?
            .path("username", Schema::String)?
            .build(),
    );
    m.insert(
        DeleteUser,
        ContractBuilder::new().path("username", Schema::String)?.build(),
    );
    m.insert(
        CreateUsersWithListInput,
        ContractBuilder::new()
            .body(Schema::array(entity(EntityName::User)))?
            .build(),
    );
    m.insert(
        LoginUser,
        ContractBuilder::new()
            .query("username", Schema::String.optional())?
            .query("password", Schema::String.optional())?
            .build(),
    );
    m.insert(LogoutUser, ContractBuilder::new().build());

    Ok(m)
}
