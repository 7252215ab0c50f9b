pub mod chain_detail;
pub mod explorer;
pub mod launch_wizard;
pub mod milestones;
pub mod pools;
pub mod staking;
pub mod trade;
pub mod wallet;
