use alloy::sol;

sol! {
interface IBalloons {
    function transfer(address to, uint256 amount) external returns (bool);

    function approve(address spender, uint256 amount) external returns (bool);

    function balanceOf(address account) external view returns (uint256);

    function allowance(address owner, address spender) external view returns (uint256);
}

interface IDex {
    function init(uint256 tokens) external payable returns (uint256);

    function totalLiquidity() external view returns (uint256);
}

}
