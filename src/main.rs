use infinite_mage::components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
