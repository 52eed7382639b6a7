//! Application services for board provisioning.

mod board_provisioning;

pub use board_provisioning::{
    BoardProvisioningError, BoardProvisioningResult, BoardProvisioningService, CreateBoardRequest,
};
