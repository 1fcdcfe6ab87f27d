use crate::entity::user::Entity as UserEntity;
use crate::schemas::{CreateUser, UpdateUser};
use crate::services::BaseService;

pub type UserService<'s> = BaseService<'s, UserEntity, CreateUser, UpdateUser>;
