//! Solidity ABI bindings for the fixed functions this crate encodes calls to.

use alloy_sol_types::sol;

sol! {
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }

    interface IERC721 {
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
    }

    /// Safe MultiSend relay. Must be delegate-called so the sub-calls run in the avatar's context.
    ///
    /// `transactions` is a concatenation of packed records:
    /// operation (1 byte) | to (20 bytes) | value (32 bytes) | data length (32 bytes) | data
    interface IMultiSend {
        function multiSend(bytes memory transactions) external payable;
    }

    /// Entry point of a Zodiac-style module/modifier that executes on behalf of its avatar.
    interface IExecutionModule {
        function execTransactionFromModule(address to, uint256 value, bytes data, uint8 operation)
            external
            returns (bool success);
    }
}
