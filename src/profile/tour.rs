//! Portal tour text shown with each profile variant.

use crate::params::Variant;
use crate::rspec::Tour;

const IBM_FL_DESCRIPTION: &str = "\
A simple Federated setup with a single server node and a variable number of client nodes connected in a LAN.
This profile utilizes IBM's enterprise Federated framework. You may also optionally pick the
specific hardware type and Ubuntu image (default Ubuntu 18.04) for all the nodes in the lan.
";

const IBM_FL_INSTRUCTIONS: &str = "\
# IBM Instructions

**NOTE:** These instructions assume you have opted for the optional file mount on the ```/mydata``` directory.

## Finishing the Install
To finish installing the IBM environment, follow the following instructions for **ALL** nodes.

To install Miniconda, do:

    sudo /local/repository/bin/install_conda.sh

After installing Miniconda, please close and reopen your shell to finish the Miniconda setup.

To install IBM-FL, do:

    sudo bash
    sudo bash -i /local/repository/bin/install_ibmfl.sh

This will install all dependencies in the **tf2** conda environment.

## Verify the install

To execute the example code in ```/mydata/federated-learning-lib/Notebooks```, run the following commands.
You may also find the tutorials [here](https://github.com/IBM/federated-learning-lib) helpful as well.

    sudo bash
    conda activate tf2
    cd / && jupyter notebook --allow-root --no-browser

Now point your browser at **pcXXX.emulab.net:8888/?token=JUPYTER_TOKEN**, where **pcXXX** is the emulab compute node and **JUPYTER_TOKEN** is the Jupyter authentication token.

**NOTES:** To utilize the Conda environment, you must be running the bash shell with elevated privileges i.e. **sudo bash**.
Find the IBM documentation [here](https://ibmfl-api-docs.mybluemix.net/).
IBM-FL and Miniconda have been installed in the ```/mydata``` directory.
";

const LEAF_DESCRIPTION: &str = "\
A simple Federated setup with a single server node and a variable number of client nodes connected in a LAN.
Every node runs the LEAF federated learning benchmark installer at boot. You may also optionally pick the
specific hardware type and Ubuntu image (default Ubuntu 18.04) for all the nodes in the lan.
";

const LEAF_INSTRUCTIONS: &str = "\
# LEAF Instructions

The LEAF installer runs automatically on **ALL** nodes the first time they boot.
Its output is logged by the testbed startup service; wait for it to finish before using the nodes.

To re-run the install by hand, do:

    sudo /local/repository/bin/leaf_install.sh

If you enabled the temporary filesystem, it is mounted on the ```/mydata``` directory.
";

/// Tour attached to requests of the given variant
pub fn for_variant(variant: Variant) -> Tour {
    let (description, instructions) = match variant {
        Variant::IbmFl => (IBM_FL_DESCRIPTION, IBM_FL_INSTRUCTIONS),
        Variant::Leaf => (LEAF_DESCRIPTION, LEAF_INSTRUCTIONS),
    };
    Tour {
        description: description.to_string(),
        instructions: instructions.to_string(),
    }
}
