// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::sol;

sol! {
    /// Orderbook router: swaps across a chain of markets in one call.
    /// Payable so the first hop can be funded with native currency.
    #[sol(rpc)]
    interface MarketRouter {
        function anyToAnySwap(
            address[] calldata marketAddresses,
            bool[] calldata isBuy,
            bool[] calldata nativeSend,
            address debitToken,
            address creditToken,
            uint256 amount,
            uint256 minAmountOut
        ) external payable returns (uint256);
    }

    #[sol(rpc)]
    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IEntryPoint {
        function getNonce(address sender, uint192 key) external view returns (uint256);
    }

    /// Execution surface of the smart account itself.
    #[sol(rpc)]
    interface IAccount {
        function execute(address dest, uint256 value, bytes calldata func) external;
    }
}
